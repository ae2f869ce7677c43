//! A form's values paired with its controller

use super::clock::Clock;
use super::controller::{
    Resolution, SubmissionController, SubmissionStatus, SubmitAttempt, SubmitTicket,
};
use super::error::{FormError, SubmitError};
use super::traits::Submitter;
use crate::forms::{FieldValue, FormKind, FormValues};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Collaborator outcome delivered back to the event loop
#[derive(Debug)]
pub struct CompletedSubmission {
    pub kind: FormKind,
    pub id: Uuid,
    pub outcome: Result<(), SubmitError>,
}

/// Everything the presentation layer needs for one form
#[derive(Debug)]
pub struct FormSession {
    values: FormValues,
    controller: SubmissionController,
}

impl FormSession {
    pub fn new(kind: FormKind, revert_after: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            values: FormValues::new(kind),
            controller: SubmissionController::new(kind, revert_after, clock),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.controller.kind()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut FormValues {
        &mut self.values
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.set_field(name, value);
    }

    pub fn reset(&mut self) {
        self.values.reset();
    }

    pub fn status(&self) -> SubmissionStatus {
        self.controller.status()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.controller.error()
    }

    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.controller.success_message()
    }

    pub fn begin_submit(&mut self) -> SubmitAttempt {
        self.controller.begin_submit(&self.values)
    }

    /// Apply a collaborator outcome; a success clears the form
    pub fn resolve(&mut self, id: Uuid, outcome: Result<(), SubmitError>) -> Resolution {
        let resolution = self.controller.resolve(id, outcome);
        if resolution == Resolution::Applied(SubmissionStatus::Success) {
            self.values.reset();
        }
        resolution
    }

    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    /// Validate, submit and resolve in one go, awaiting the collaborator inline
    #[allow(dead_code)]
    pub async fn submit(&mut self, submitter: &dyn Submitter) -> SubmissionStatus {
        if let SubmitAttempt::Started(ticket) = self.begin_submit() {
            let outcome = submitter.submit(ticket.kind, ticket.values).await;
            self.resolve(ticket.id, outcome);
        }
        self.status()
    }
}

/// Run the collaborator for `ticket` on its own task and report back on `tx`.
///
/// A collaborator that panics is reported as an internal failure.
pub fn spawn_submission(
    ticket: SubmitTicket,
    submitter: Arc<dyn Submitter>,
    tx: mpsc::UnboundedSender<CompletedSubmission>,
) {
    let SubmitTicket { id, kind, values } = ticket;
    tokio::spawn(async move {
        let task = tokio::spawn(async move { submitter.submit(kind, values).await });
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => Err(SubmitError::Internal {
                reason: e.to_string(),
            }),
        };
        if tx.send(CompletedSubmission { kind, id, outcome }).is_err() {
            tracing::debug!("Event loop gone before {kind} submission {id} finished");
        }
    });
}
