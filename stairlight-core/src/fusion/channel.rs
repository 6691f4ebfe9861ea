//! One presence sensor as seen by the fusion layer

use crate::config::{SensorConfig, SensorKind};
use crate::traits::SensorIo;

/// Runtime state of one presence sensor
///
/// Holds the debounced state, the most recent raw read and the one-shot
/// write override used by the API and messaging commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorChannel {
    state: bool,
    last_read: bool,
    write_override: bool,
}

impl SensorChannel {
    /// Create an idle channel
    pub const fn new() -> Self {
        Self {
            state: false,
            last_read: false,
            write_override: false,
        }
    }

    /// Debounced state
    pub fn state(&self) -> bool {
        self.state
    }

    /// Value of the latest read
    pub fn last_read(&self) -> bool {
        self.last_read
    }

    /// Check if the next read is forced to "detected"
    pub fn is_overridden(&self) -> bool {
        self.write_override
    }

    /// Force the next read to report "detected"
    pub fn force_detected(&mut self) {
        self.write_override = true;
    }

    /// Set the override from an external state write
    ///
    /// A sensor that is currently detecting keeps itself overridden, so a
    /// state write never clears an active detection.
    pub fn merge_override(&mut self, requested: bool) {
        self.write_override = self.state || requested;
    }

    /// Drop a pending override
    pub fn clear_override(&mut self) {
        self.write_override = false;
    }

    /// Read the sensor once, honouring the override
    pub fn sample<I: SensorIo>(&mut self, config: &SensorConfig, io: &mut I) -> bool {
        let read = self.write_override || read_hardware(config, io);
        self.last_read = read;
        read
    }

    /// Store a fresh read, returning true on a state change
    pub fn update(&mut self, read: bool) -> bool {
        if read == self.state {
            return false;
        }
        self.state = read;
        true
    }

    /// Forget all runtime state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Read the physical sensor; unwired sensors never detect
fn read_hardware<I: SensorIo>(config: &SensorConfig, io: &mut I) -> bool {
    match (config.kind, config.trigger_pin, config.echo_pin) {
        (SensorKind::Trigger, Some(pin), _) => io.read_level(pin),
        (SensorKind::Ultrasonic, Some(trigger), Some(echo)) => {
            io.ping(trigger, echo, config.echo_timeout_us())
        }
        _ => false,
    }
}
