//! GPIO bank addressed by pin number
//!
//! Implements [`SensorIo`] over an array of flexible pins. Each pin can be
//! switched between input and output at runtime, which is what a
//! config-driven sensor setup needs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use stairlight_core::traits::{PinMode, SensorIo};

use crate::sensor::ultrasonic;

/// GPIO pin that can change direction at runtime
///
/// embedded-hal has no mode switching, so the platform provides it.
pub trait FlexPin: InputPin + OutputPin {
    /// Put the pin into `mode`
    fn set_mode(&mut self, mode: PinMode);
}

/// Bank of `N` pins plus a delay source for ultrasonic timing
pub struct GpioBank<P, D, const N: usize> {
    pins: [P; N],
    modes: [Option<PinMode>; N],
    delay: D,
}

impl<P: FlexPin, D: DelayNs, const N: usize> GpioBank<P, D, N> {
    /// Create a bank; pin `i` of the array is GPIO number `i`
    pub fn new(pins: [P; N], delay: D) -> Self {
        Self {
            pins,
            modes: [None; N],
            delay,
        }
    }

    /// Mode a pin was last configured with
    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.modes.get(pin as usize).copied().flatten()
    }
}

impl<P: FlexPin, D: DelayNs, const N: usize> SensorIo for GpioBank<P, D, N> {
    fn configure(&mut self, pin: u8, mode: PinMode) {
        let Some(p) = self.pins.get_mut(pin as usize) else {
            return;
        };
        p.set_mode(mode);
        if mode == PinMode::Output {
            if let Err(_e) = p.set_low() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Pin {} could not be driven low: {}", pin, defmt::Debug2Format(&_e));
            }
        }
        self.modes[pin as usize] = Some(mode);
    }

    fn read_level(&mut self, pin: u8) -> bool {
        match self.mode(pin) {
            Some(PinMode::Input | PinMode::InputPullDown) => self.pins[pin as usize]
                .is_high()
                .unwrap_or(false),
            _ => false,
        }
    }

    fn ping(&mut self, trigger: u8, echo: u8, timeout_us: u32) -> bool {
        if self.mode(trigger) != Some(PinMode::Output) || self.mode(echo) != Some(PinMode::Input) {
            return false;
        }
        let Some((t, e)) = pair_mut(&mut self.pins, trigger, echo) else {
            return false;
        };
        match ultrasonic::ping(t, e, &mut self.delay, timeout_us) {
            Ok(hit) => hit,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Ultrasonic ping on {} failed: {}", trigger, _e);
                false
            }
        }
    }
}

/// Borrow two distinct pins at once
fn pair_mut<P>(pins: &mut [P], a: u8, b: u8) -> Option<(&mut P, &mut P)> {
    let (a, b) = (a as usize, b as usize);
    if a == b || a >= pins.len() || b >= pins.len() {
        return None;
    }
    if a < b {
        let (lo, hi) = pins.split_at_mut(b);
        Some((&mut lo[a], &mut hi[0]))
    } else {
        let (lo, hi) = pins.split_at_mut(a);
        Some((&mut hi[0], &mut lo[b]))
    }
}
