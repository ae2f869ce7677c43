//! Trait abstraction for the submit collaborator to enable mocking in tests

use super::error::SubmitError;
use crate::forms::{FormKind, FormValues};
use async_trait::async_trait;

/// Sends a validated form somewhere. A real backend replaces the simulated
/// one without touching the state machine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit a snapshot of the form values
    async fn submit(&self, kind: FormKind, values: FormValues) -> Result<(), SubmitError>;
}
