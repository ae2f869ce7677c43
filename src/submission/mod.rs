//! Submission lifecycle: controller, collaborator traits and the session
//! wrapper used by the front end

mod clock;
mod controller;
mod error;
mod session;
mod simulated;
mod traits;

pub use clock::{Clock, SystemClock};
pub use controller::{SubmissionStatus, SubmitAttempt};
pub use session::{spawn_submission, CompletedSubmission, FormSession};
pub use simulated::SimulatedSubmitter;
pub use traits::Submitter;

#[cfg(test)]
pub use clock::ManualClock;
