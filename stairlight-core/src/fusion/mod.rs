//! Sensor fusion
//!
//! Reads the top and bottom presence sensors, turns level changes into
//! edge events and derives the direction someone is walking.

pub mod channel;
pub mod side;
pub mod state;

pub use channel::SensorChannel;
pub use side::{Direction, Side};
pub use state::{PollOutcome, SensorFusion, SCAN_INTERVAL_MS, SCAN_INTERVAL_LIT_MS};
