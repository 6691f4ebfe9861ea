//! Board-agnostic core logic for the staircase lighting controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (renderer, sensor I/O, pins, storage, messaging)
//! - Sensor fusion with edge-triggered debounce and travel direction
//! - Wipe animation state machine (on, hold, off)
//! - Messaging commands and events
//! - Configuration types and persistence
//! - The [`Staircase`] aggregate that ties a tick together

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod fusion;
pub mod messaging;
pub mod staircase;
pub mod traits;
pub mod wipe;

#[cfg(test)]
pub(crate) mod mock;

pub use staircase::{ModuleInfo, Staircase, StateSnapshot, StateUpdate, TickOutcome, MODULE_NAME};
