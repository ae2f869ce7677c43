//! Fixed-latency stand-in for a backend

use super::error::SubmitError;
use super::traits::Submitter;
use crate::forms::{FormKind, FormValues};
use async_trait::async_trait;
use std::time::Duration;

/// Default simulated network latency
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// Waits a fixed delay and then accepts every submission
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
}

impl SimulatedSubmitter {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, kind: FormKind, values: FormValues) -> Result<(), SubmitError> {
        tracing::debug!(
            "Simulating {kind} submission ({} fields, {:?} latency)",
            values.field_count(),
            self.latency
        );
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}
