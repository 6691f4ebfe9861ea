//! Configuration types
//!
//! Board-agnostic settings for the staircase module, stored as postcard
//! binary data in the host's settings store.

pub mod persist;
pub mod types;

pub use persist::{load, save, ConfigError, MAX_CONFIG_SIZE};
pub use types::*;
