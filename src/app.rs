//! Application state and core logic

use crate::config::FestConfig;
use crate::forms::{FieldValue, FormKind, UploadedFile};
use crate::state::{AppState, BannerState, CountdownState};
use crate::storage::FlagStore;
use crate::submission::{
    spawn_submission, Clock, CompletedSubmission, SubmitAttempt, Submitter,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Rotating announcement
    pub banner: BannerState,
    /// Festival countdown
    pub countdown: CountdownState,
    /// One-line feedback not tied to a form (banner errors, countdown end)
    pub status_message: Option<String>,
    flags: Box<dyn FlagStore>,
    submitter: Arc<dyn Submitter>,
    clock: Arc<dyn Clock>,
    completed_tx: mpsc::UnboundedSender<CompletedSubmission>,
    completed_rx: mpsc::UnboundedReceiver<CompletedSubmission>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: &FestConfig,
        flags: Box<dyn FlagStore>,
        submitter: Arc<dyn Submitter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let banner = BannerState::load(
            flags.as_ref(),
            clock.now(),
            config.banner_rotate(),
            config.banner_auto_hide(),
        );
        let (completed_tx, completed_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::new(config, clock.clone()),
            banner,
            countdown: CountdownState::new(config.event_start(), clock.wall_now()),
            status_message: None,
            flags,
            submitter,
            clock,
            completed_tx,
            completed_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply finished submissions and fire due timers. Called once per frame.
    pub fn poll(&mut self) {
        while let Ok(done) = self.completed_rx.try_recv() {
            self.apply_completed(done);
        }

        self.state.forms.tick_all();
        self.banner.tick(self.clock.now());
        if self.countdown.update(self.clock.wall_now()) {
            tracing::info!("Countdown reached {}", self.countdown.target());
            self.status_message = Some("The festival has begun!".to_string());
        }
    }

    fn apply_completed(&mut self, done: CompletedSubmission) {
        let CompletedSubmission { kind, id, outcome } = done;
        self.state.forms.get_mut(kind).resolve(id, outcome);
        if kind == FormKind::Signup && self.state.forms.get(kind).values().is_empty() {
            self.state.college_id_path.clear();
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if ctrl => self.submit_current(),
            KeyCode::Char('d') if ctrl => self.dismiss_banner(),
            KeyCode::Char('r') if ctrl => self.clear_current(),
            KeyCode::F(1) => self.switch_form(FormKind::Login),
            KeyCode::F(2) => self.switch_form(FormKind::Signup),
            KeyCode::F(3) => self.switch_form(FormKind::Contact),
            KeyCode::Tab => self.state.current_mut().values_mut().next_field(),
            KeyCode::BackTab => self.state.current_mut().values_mut().prev_field(),
            KeyCode::Enter => self.handle_enter(),
            KeyCode::Backspace => {
                if self.state.is_file_field_active() {
                    self.state.college_id_path.pop();
                } else {
                    self.state.current_mut().values_mut().pop_char();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if self.state.is_file_field_active() {
                    self.state.college_id_path.push(c);
                } else {
                    self.state.current_mut().values_mut().push_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_enter(&mut self) {
        let values = self.state.current().values();
        let multiline = values.active_spec().is_multiline();
        let last = values.is_last_field_active();
        if multiline {
            self.state.current_mut().values_mut().push_char('\n');
        } else if last {
            self.submit_current();
        } else {
            self.state.current_mut().values_mut().next_field();
        }
    }

    /// Clear the form on screen. Leaves an in-flight submission alone.
    fn clear_current(&mut self) {
        if self.state.current().is_submitting() {
            return;
        }
        self.state.current_mut().reset();
        if self.state.current_form == FormKind::Signup {
            self.state.college_id_path.clear();
        }
    }

    fn switch_form(&mut self, kind: FormKind) {
        self.state.current_form = kind;
    }

    fn dismiss_banner(&mut self) {
        if let Err(e) = self.banner.dismiss(self.flags.as_mut()) {
            tracing::warn!("Failed to persist banner dismissal: {e:#}");
            self.status_message = Some("Could not save banner preference".to_string());
        }
    }

    /// Submit the form on screen. A submission already in flight is left alone.
    pub fn submit_current(&mut self) {
        let kind = self.state.current_form;
        if kind == FormKind::Signup {
            self.attach_college_id();
        }

        match self.state.current_mut().begin_submit() {
            SubmitAttempt::Started(ticket) => {
                spawn_submission(ticket, self.submitter.clone(), self.completed_tx.clone());
            }
            SubmitAttempt::Rejected(err) => {
                tracing::debug!("{kind} submit rejected: {err}");
            }
            SubmitAttempt::Ignored => {}
        }
    }

    /// Turn the typed path into upload metadata, or clear the field
    fn attach_college_id(&mut self) {
        if self.state.forms.get(FormKind::Signup).is_submitting() {
            return;
        }
        let path = self.state.college_id_path.trim().to_string();
        let value = if path.is_empty() {
            FieldValue::File(None)
        } else {
            match UploadedFile::from_path(&path) {
                Ok(file) => FieldValue::File(Some(file)),
                Err(e) => {
                    tracing::warn!("College ID not usable: {e:#}");
                    FieldValue::File(None)
                }
            }
        };
        self.state
            .forms
            .get_mut(FormKind::Signup)
            .set_field("college_id", value);
    }
}
