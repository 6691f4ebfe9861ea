//! Sensor drivers

pub mod bh1750;
pub mod ultrasonic;

pub use bh1750::Bh1750;
pub use ultrasonic::{ping, UltrasonicError};
