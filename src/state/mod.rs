//! Application state module

mod app_state;
mod banner_state;
mod countdown_state;

pub use app_state::*;
pub use banner_state::*;
pub use countdown_state::*;
