//! Application state definitions

use crate::config::FestConfig;
use crate::forms::FormKind;
use crate::submission::{Clock, FormSession};
use std::sync::Arc;

/// One session per form, each with its own lifecycle
#[derive(Debug)]
pub struct FormSessions {
    login: FormSession,
    signup: FormSession,
    contact: FormSession,
}

impl FormSessions {
    pub fn new(config: &FestConfig, clock: Arc<dyn Clock>) -> Self {
        let session = |kind| FormSession::new(kind, config.revert_after(kind), clock.clone());
        Self {
            login: session(FormKind::Login),
            signup: session(FormKind::Signup),
            contact: session(FormKind::Contact),
        }
    }

    pub fn get(&self, kind: FormKind) -> &FormSession {
        match kind {
            FormKind::Login => &self.login,
            FormKind::Signup => &self.signup,
            FormKind::Contact => &self.contact,
        }
    }

    pub fn get_mut(&mut self, kind: FormKind) -> &mut FormSession {
        match kind {
            FormKind::Login => &mut self.login,
            FormKind::Signup => &mut self.signup,
            FormKind::Contact => &mut self.contact,
        }
    }

    /// Let every form's revert timer fire. Returns true if any status changed.
    pub fn tick_all(&mut self) -> bool {
        let mut changed = false;
        for kind in FormKind::ALL {
            changed |= self.get_mut(kind).tick();
        }
        changed
    }
}

/// Front-end state that is not owned by a form
#[derive(Debug)]
pub struct AppState {
    /// Form currently on screen
    pub current_form: FormKind,
    pub forms: FormSessions,
    /// Path typed into the signup college ID field, resolved on submit
    pub college_id_path: String,
}

impl AppState {
    pub fn new(config: &FestConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            current_form: FormKind::Login,
            forms: FormSessions::new(config, clock),
            college_id_path: String::new(),
        }
    }

    pub fn current(&self) -> &FormSession {
        self.forms.get(self.current_form)
    }

    pub fn current_mut(&mut self) -> &mut FormSession {
        self.forms.get_mut(self.current_form)
    }

    /// True when typing goes to the college ID path buffer
    pub fn is_file_field_active(&self) -> bool {
        self.current().values().active_spec().is_file()
    }
}
