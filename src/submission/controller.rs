//! Submission state machine
//!
//! `Idle -> Submitting -> Success | Error -> Idle`. A validation failure
//! goes straight from `Idle` to `Error` without entering `Submitting`.
//! `Success` and `Error` fall back to `Idle` once the revert deadline passes;
//! every new `Success`/`Error` replaces the previous deadline so a stale
//! timer can never clear a newer status.

use super::clock::Clock;
use super::error::{FormError, SubmitError};
use crate::forms::{validate_form, FormKind, FormValues};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Lifecycle phase of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// An accepted submission waiting for the collaborator
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub id: Uuid,
    pub kind: FormKind,
    pub values: FormValues,
}

/// What happened when a submit was requested
#[derive(Debug)]
pub enum SubmitAttempt {
    /// Validation passed; hand the ticket to the collaborator
    Started(SubmitTicket),
    /// Validation failed; the form is now in `Error`
    Rejected(FormError),
    /// A submission is already in flight; nothing changed
    Ignored,
}

/// What happened when a collaborator outcome arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(SubmissionStatus),
    /// The outcome does not belong to the in-flight submission
    Stale,
}

/// User-facing failure text shown instead of collaborator details
fn generic_failure(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Login | FormKind::Signup => "Please check your information and try again.",
        FormKind::Contact => "Failed to send message. Please try again.",
    }
}

fn success_text(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Login => "Login successful!",
        FormKind::Signup => "Registration successful!",
        FormKind::Contact => "Message sent successfully! We'll get back to you soon.",
    }
}

/// Drives one form through its submission lifecycle
pub struct SubmissionController {
    kind: FormKind,
    status: SubmissionStatus,
    error: Option<FormError>,
    in_flight: Option<Uuid>,
    revert_at: Option<Instant>,
    revert_after: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionController")
            .field("kind", &self.kind)
            .field("status", &self.status)
            .field("error", &self.error)
            .field("in_flight", &self.in_flight)
            .field("revert_at", &self.revert_at)
            .field("revert_after", &self.revert_after)
            .finish_non_exhaustive()
    }
}

impl SubmissionController {
    pub fn new(kind: FormKind, revert_after: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            kind,
            status: SubmissionStatus::Idle,
            error: None,
            in_flight: None,
            revert_at: None,
            revert_after,
            clock,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Current failure, if the form is showing one
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Confirmation text while in `Success`
    pub fn success_message(&self) -> Option<&'static str> {
        (self.status == SubmissionStatus::Success).then(|| success_text(self.kind))
    }

    /// When the current `Success`/`Error` will fall back to `Idle`
    #[allow(dead_code)]
    pub fn revert_deadline(&self) -> Option<Instant> {
        self.revert_at
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Validate `values` and, if they pass, move to `Submitting`.
    pub fn begin_submit(&mut self, values: &FormValues) -> SubmitAttempt {
        debug_assert_eq!(values.kind(), self.kind);
        if self.status == SubmissionStatus::Submitting {
            tracing::debug!("Ignoring {} submit: already in flight", self.kind);
            return SubmitAttempt::Ignored;
        }

        // Drop whatever the last cycle left behind before judging the new input
        self.revert_at = None;
        self.error = None;
        self.status = SubmissionStatus::Idle;

        if let Err(err) = validate_form(self.kind, values) {
            tracing::debug!(
                "{} validation failed on {:?}: {}",
                self.kind,
                err.field,
                err.message
            );
            let err = FormError::from(err);
            self.enter(SubmissionStatus::Error, Some(err.clone()));
            return SubmitAttempt::Rejected(err);
        }

        let id = Uuid::new_v4();
        self.in_flight = Some(id);
        self.status = SubmissionStatus::Submitting;
        tracing::info!("Submitting {} form (attempt {id})", self.kind);

        SubmitAttempt::Started(SubmitTicket {
            id,
            kind: self.kind,
            values: values.clone(),
        })
    }

    /// Apply the collaborator outcome for attempt `id`
    pub fn resolve(&mut self, id: Uuid, outcome: Result<(), SubmitError>) -> Resolution {
        if self.in_flight != Some(id) {
            tracing::debug!("Dropping stale {} outcome for attempt {id}", self.kind);
            return Resolution::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(()) => {
                tracing::info!("{} submission {id} succeeded", self.kind);
                self.enter(SubmissionStatus::Success, None);
            }
            Err(err) => {
                tracing::warn!("{} submission {id} failed: {err}", self.kind);
                let shown = FormError::Submission {
                    message: generic_failure(self.kind).to_string(),
                };
                self.enter(SubmissionStatus::Error, Some(shown));
            }
        }
        Resolution::Applied(self.status)
    }

    /// Fall back to `Idle` if the revert deadline has passed.
    /// Returns true when the status changed.
    pub fn tick(&mut self) -> bool {
        match self.revert_at {
            Some(deadline) if self.clock.now() >= deadline => {
                tracing::debug!("{} status {} reverted to idle", self.kind, self.status);
                self.revert_at = None;
                self.error = None;
                self.status = SubmissionStatus::Idle;
                true
            }
            _ => false,
        }
    }

    fn enter(&mut self, status: SubmissionStatus, error: Option<FormError>) {
        self.status = status;
        self.error = error;
        self.revert_at = Some(self.clock.now() + self.revert_after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::clock::ManualClock;
    use pretty_assertions::assert_eq;

    const REVERT: Duration = Duration::from_secs(5);

    fn controller(kind: FormKind) -> (SubmissionController, ManualClock) {
        let clock = ManualClock::new();
        let controller = SubmissionController::new(kind, REVERT, Arc::new(clock.clone()));
        (controller, clock)
    }

    fn valid_login() -> FormValues {
        let mut values = FormValues::new(FormKind::Login);
        values.set_field("email", "user@example.com");
        values.set_field("password", "secret");
        values
    }

    fn start(controller: &mut SubmissionController, values: &FormValues) -> SubmitTicket {
        match controller.begin_submit(values) {
            SubmitAttempt::Started(ticket) => ticket,
            other => panic!("expected Started, got {other:?}"),
        }
    }

    mod lifecycle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_idle() {
            let (c, _) = controller(FormKind::Login);
            assert_eq!(c.status(), SubmissionStatus::Idle);
            assert!(c.error().is_none());
            assert!(c.revert_deadline().is_none());
        }

        #[test]
        fn test_success_then_revert_to_idle() {
            let (mut c, clock) = controller(FormKind::Login);
            let ticket = start(&mut c, &valid_login());
            assert_eq!(c.status(), SubmissionStatus::Submitting);
            assert_eq!(ticket.kind, FormKind::Login);
            assert_eq!(ticket.values.text("email"), "user@example.com");

            assert_eq!(
                c.resolve(ticket.id, Ok(())),
                Resolution::Applied(SubmissionStatus::Success)
            );
            assert_eq!(c.success_message(), Some("Login successful!"));
            assert!(c.error().is_none());

            clock.advance(REVERT - Duration::from_millis(1));
            assert!(!c.tick());
            assert_eq!(c.status(), SubmissionStatus::Success);

            clock.advance(Duration::from_millis(1));
            assert!(c.tick());
            assert_eq!(c.status(), SubmissionStatus::Idle);
            assert!(c.error().is_none());
            assert!(c.success_message().is_none());
            assert!(c.revert_deadline().is_none());
        }

        #[test]
        fn test_failure_shows_generic_message() {
            let (mut c, clock) = controller(FormKind::Contact);
            let mut values = FormValues::new(FormKind::Contact);
            values.set_field("name", "Ravi");
            values.set_field("email", "ravi@example.com");
            values.set_field("subject", "Hi");
            values.set_field("message", "Hello");
            let ticket = start(&mut c, &values);

            c.resolve(
                ticket.id,
                Err(SubmitError::Unreachable {
                    reason: "dns lookup failed for api.internal".into(),
                }),
            );

            assert_eq!(c.status(), SubmissionStatus::Error);
            assert_eq!(
                c.error(),
                Some(&FormError::Submission {
                    message: "Failed to send message. Please try again.".into()
                })
            );
            assert!(!c.error().unwrap().message().contains("dns"));

            clock.advance(REVERT);
            c.tick();
            assert_eq!(c.status(), SubmissionStatus::Idle);
            assert!(c.error().is_none());
        }

        #[test]
        fn test_tick_while_idle_does_nothing() {
            let (mut c, clock) = controller(FormKind::Login);
            clock.advance(Duration::from_secs(60));
            assert!(!c.tick());
            assert_eq!(c.status(), SubmissionStatus::Idle);
        }

        #[test]
        fn test_tick_while_submitting_does_nothing() {
            let (mut c, clock) = controller(FormKind::Login);
            start(&mut c, &valid_login());
            clock.advance(Duration::from_secs(60));
            assert!(!c.tick());
            assert_eq!(c.status(), SubmissionStatus::Submitting);
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_input_never_enters_submitting() {
            let (mut c, _) = controller(FormKind::Signup);
            let attempt = c.begin_submit(&FormValues::new(FormKind::Signup));

            let SubmitAttempt::Rejected(err) = attempt else {
                panic!("expected Rejected");
            };
            assert_eq!(err.field(), Some("name"));
            assert_eq!(c.status(), SubmissionStatus::Error);
            assert_eq!(c.error(), Some(&err));
            assert!(c.revert_deadline().is_some());
        }

        #[test]
        fn test_validation_error_reverts_after_window() {
            let (mut c, clock) = controller(FormKind::Login);
            c.begin_submit(&FormValues::new(FormKind::Login));
            clock.advance(REVERT);
            assert!(c.tick());
            assert_eq!(c.status(), SubmissionStatus::Idle);
            assert!(c.error().is_none());
        }

        #[test]
        fn test_resubmit_after_error_clears_old_message() {
            let (mut c, _) = controller(FormKind::Login);
            let ticket = start(&mut c, &valid_login());
            c.resolve(
                ticket.id,
                Err(SubmitError::Rejected {
                    reason: "bad".into(),
                }),
            );
            assert!(matches!(c.error(), Some(FormError::Submission { .. })));

            let _ticket = start(&mut c, &valid_login());
            assert!(c.error().is_none());
            assert_eq!(c.status(), SubmissionStatus::Submitting);
        }

        #[test]
        fn test_new_validation_failure_replaces_submission_failure() {
            let (mut c, _) = controller(FormKind::Login);
            let ticket = start(&mut c, &valid_login());
            c.resolve(
                ticket.id,
                Err(SubmitError::Internal {
                    reason: "boom".into(),
                }),
            );

            c.begin_submit(&FormValues::new(FormKind::Login));

            let err = c.error().unwrap();
            assert!(err.is_validation());
            assert_eq!(err.message(), "Please enter a valid email address");
        }
    }

    mod concurrency {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_submit_while_submitting_is_ignored() {
            let (mut c, _) = controller(FormKind::Login);
            let ticket = start(&mut c, &valid_login());

            let second = c.begin_submit(&FormValues::new(FormKind::Login));

            assert!(matches!(second, SubmitAttempt::Ignored));
            assert_eq!(c.status(), SubmissionStatus::Submitting);
            assert!(c.error().is_none());
            assert_eq!(
                c.resolve(ticket.id, Ok(())),
                Resolution::Applied(SubmissionStatus::Success)
            );
        }

        #[test]
        fn test_unknown_attempt_is_stale() {
            let (mut c, _) = controller(FormKind::Login);
            let _ticket = start(&mut c, &valid_login());

            assert_eq!(c.resolve(Uuid::new_v4(), Ok(())), Resolution::Stale);
            assert_eq!(c.status(), SubmissionStatus::Submitting);
        }

        #[test]
        fn test_outcome_after_resolution_is_stale() {
            let (mut c, _) = controller(FormKind::Login);
            let ticket = start(&mut c, &valid_login());
            c.resolve(ticket.id, Ok(()));

            assert_eq!(
                c.resolve(
                    ticket.id,
                    Err(SubmitError::Internal {
                        reason: "late".into()
                    })
                ),
                Resolution::Stale
            );
            assert_eq!(c.status(), SubmissionStatus::Success);
        }

        #[test]
        fn test_new_cycle_replaces_pending_revert_deadline() {
            let (mut c, clock) = controller(FormKind::Login);
            let first = start(&mut c, &valid_login());
            c.resolve(first.id, Ok(()));
            let first_deadline = c.revert_deadline().unwrap();

            // Resubmit late in the first window
            clock.advance(REVERT - Duration::from_secs(1));
            let second = start(&mut c, &valid_login());
            assert!(c.revert_deadline().is_none());
            c.resolve(second.id, Ok(()));
            let second_deadline = c.revert_deadline().unwrap();
            assert!(second_deadline > first_deadline);

            // The first window's expiry must not clear the newer status
            clock.advance(Duration::from_secs(1));
            assert!(!c.tick());
            assert_eq!(c.status(), SubmissionStatus::Success);

            clock.advance(REVERT);
            assert!(c.tick());
            assert_eq!(c.status(), SubmissionStatus::Idle);
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SubmissionStatus::Submitting.to_string(), "submitting");
    }
}
