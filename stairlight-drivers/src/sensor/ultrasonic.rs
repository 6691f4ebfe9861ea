//! Ultrasonic ranger (HC-SR04 style)
//!
//! A 10 µs pulse on the trigger pin starts a measurement. The sensor then
//! raises the echo line for as long as the sound takes to come back. An
//! echo that both starts and ends inside the timeout means something is
//! within range.
//!
//! ```text
//! trigger  __|‾‾10µs‾‾|____________________________
//! echo     _______________|‾‾‾‾ round trip ‾‾‾‾|___
//!                    ◄──────── timeout_us ────────►
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Low time before the trigger pulse (µs)
const SETTLE_US: u32 = 2;

/// Trigger pulse width (µs)
const TRIGGER_PULSE_US: u32 = 10;

/// Echo polling step (µs)
const POLL_STEP_US: u32 = 1;

/// Ultrasonic ping error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UltrasonicError {
    /// Trigger pin could not be driven
    Trigger,
    /// Echo pin could not be read
    Echo,
}

/// Fire one ping and report whether an echo came back in time
pub fn ping<T, E, D>(
    trigger: &mut T,
    echo: &mut E,
    delay: &mut D,
    timeout_us: u32,
) -> Result<bool, UltrasonicError>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
{
    trigger.set_low().map_err(|_| UltrasonicError::Trigger)?;
    delay.delay_us(SETTLE_US);
    trigger.set_high().map_err(|_| UltrasonicError::Trigger)?;
    delay.delay_us(TRIGGER_PULSE_US);
    trigger.set_low().map_err(|_| UltrasonicError::Trigger)?;

    let mut elapsed = 0u32;

    // Wait for the echo to start
    while !echo.is_high().map_err(|_| UltrasonicError::Echo)? {
        if elapsed >= timeout_us {
            return Ok(false);
        }
        delay.delay_us(POLL_STEP_US);
        elapsed += POLL_STEP_US;
    }

    // Wait for it to end
    while echo.is_high().map_err(|_| UltrasonicError::Echo)? {
        if elapsed >= timeout_us {
            return Ok(false);
        }
        delay.delay_us(POLL_STEP_US);
        elapsed += POLL_STEP_US;
    }

    Ok(true)
}
