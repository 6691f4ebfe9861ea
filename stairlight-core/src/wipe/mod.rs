//! Wipe animation
//!
//! The wipe is a small, explicit state machine driven by direction
//! requests and elapsed time. Transitions are pure; the session applies
//! their side effects to the renderer.

pub mod machine;
pub mod session;
pub mod timing;

pub use machine::{WipeEvent, WipeState};
pub use session::{WipeOutcome, WipeRequest, WipeSession};
pub use timing::{cycle_duration_ms, wipe_off_duration_ms, wipe_on_duration_ms};
