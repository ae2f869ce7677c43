//! Error types surfaced by the submission layer

use thiserror::Error;

/// The one message a form shows when something went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Input failed a client-side check; fixed by editing the form
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },
    /// The submit collaborator reported failure; fixed by submitting again
    #[error("{message}")]
    Submission { message: String },
}

impl FormError {
    pub fn message(&self) -> &str {
        match self {
            FormError::Validation { message, .. } | FormError::Submission { message } => message,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            FormError::Validation { field, .. } => field.as_deref(),
            FormError::Submission { .. } => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FormError::Validation { .. })
    }
}

impl From<crate::forms::ValidationError> for FormError {
    fn from(err: crate::forms::ValidationError) -> Self {
        FormError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

/// Failure reported by a submit collaborator. The reason is for logs only.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission rejected: {reason}")]
    Rejected { reason: String },
    #[error("backend unreachable: {reason}")]
    Unreachable { reason: String },
    #[error("internal error: {reason}")]
    Internal { reason: String },
}
