//! Persistence for the few values that outlive a session

mod flag_store;

pub use flag_store::{FlagStore, JsonFileFlagStore, MemoryFlagStore};
