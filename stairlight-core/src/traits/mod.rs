//! Collaborator traits
//!
//! These traits define the interface between the staircase logic and the
//! host: the LED renderer, GPIO access, pin ownership, settings storage and
//! the message transport.

pub mod pins;
pub mod publisher;
pub mod renderer;
pub mod sensor;
pub mod store;

pub use pins::{PinArbiter, PinRequest};
pub use publisher::Publisher;
pub use renderer::{Color, Effect, Renderer};
pub use sensor::{AmbientLight, NoAmbientLight, PinMode, SensorIo};
pub use store::{SettingsStore, StorageKey, StoreError};
