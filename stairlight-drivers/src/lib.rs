//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stairlight-core on top of embedded-hal:
//!
//! - GPIO bank with pin modes, level reads and ultrasonic pings
//! - Pin registry for config-driven pin ownership
//! - Sensors (ultrasonic ranger timing, BH1750 ambient light)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio_bank;
pub mod pins;
pub mod sensor;

pub use gpio_bank::{FlexPin, GpioBank};
pub use pins::{PinError, PinRegistry};
