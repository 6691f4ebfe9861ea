//! Configuration type definitions
//!
//! These types represent the staircase module settings. Pin numbers are
//! `Option<u8>`; `None` marks an unassigned pin and makes the owning sensor
//! inert.

use serde::{Deserialize, Serialize};

/// Shortest ultrasonic detection range (cm)
pub const MIN_DISTANCE_CM: u16 = 30;

/// Longest ultrasonic detection range (cm), roughly 9 ms of echo lag
pub const MAX_DISTANCE_CM: u16 = 150;

/// Default ultrasonic detection range (cm)
pub const DEFAULT_DISTANCE_CM: u16 = 50;

/// Echo round trip per centimetre of range at ~343 m/s (µs)
pub const ECHO_US_PER_CM: u32 = 59;

/// Default hold time after the on-wipe (seconds)
pub const DEFAULT_HOLD_S: u16 = 20;

/// Default wipe animation speed
pub const DEFAULT_WIPE_SPEED: u8 = 225;

/// Default daylight threshold (lux)
pub const DEFAULT_DAYLIGHT_LUX: f32 = 100.0;

/// Presence sensor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    /// PIR or any other sensor driving a digital trigger line
    #[default]
    Trigger,
    /// Ultrasonic ranger with separate trigger and echo pins
    Ultrasonic,
}

/// Configuration of one presence sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Sensor type
    pub kind: SensorKind,
    /// PIR input or ultrasonic trigger output
    pub trigger_pin: Option<u8>,
    /// Ultrasonic echo input (unused for trigger sensors)
    pub echo_pin: Option<u8>,
    /// Ultrasonic detection range (cm)
    pub max_distance_cm: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            kind: SensorKind::Trigger,
            trigger_pin: None,
            echo_pin: None,
            max_distance_cm: DEFAULT_DISTANCE_CM,
        }
    }
}

impl SensorConfig {
    /// PIR-style sensor on a single input pin
    pub const fn trigger(pin: u8) -> Self {
        Self {
            kind: SensorKind::Trigger,
            trigger_pin: Some(pin),
            echo_pin: None,
            max_distance_cm: DEFAULT_DISTANCE_CM,
        }
    }

    /// Ultrasonic sensor with trigger and echo pins
    pub const fn ultrasonic(trigger_pin: u8, echo_pin: u8, max_distance_cm: u16) -> Self {
        Self {
            kind: SensorKind::Ultrasonic,
            trigger_pin: Some(trigger_pin),
            echo_pin: Some(echo_pin),
            max_distance_cm,
        }
    }

    /// Whether the sensor has every pin its kind needs
    pub fn is_wired(&self) -> bool {
        match self.kind {
            SensorKind::Trigger => self.trigger_pin.is_some(),
            SensorKind::Ultrasonic => self.trigger_pin.is_some() && self.echo_pin.is_some(),
        }
    }

    /// Echo timeout matching the configured range
    pub fn echo_timeout_us(&self) -> u32 {
        u32::from(self.max_distance_cm) * ECHO_US_PER_CM
    }

    /// Clamp the range and drop the echo pin for trigger sensors
    pub fn normalized(mut self) -> Self {
        self.max_distance_cm = self.max_distance_cm.clamp(MIN_DISTANCE_CM, MAX_DISTANCE_CM);
        if self.kind == SensorKind::Trigger {
            self.echo_pin = None;
        }
        self
    }

    /// True when kind or any pin differs from `other`
    pub fn wiring_differs(&self, other: &SensorConfig) -> bool {
        self.kind != other.kind
            || self.trigger_pin != other.trigger_pin
            || self.echo_pin != other.echo_pin
    }

    /// Forget all pin assignments
    pub fn unassign_pins(&mut self) {
        self.trigger_pin = None;
        self.echo_pin = None;
    }
}

/// Complete staircase module configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StaircaseConfig {
    /// Module enabled
    pub enabled: bool,
    /// Sensor at the top of the stairs
    pub top: SensorConfig,
    /// Sensor at the bottom of the stairs
    pub bottom: SensorConfig,
    /// Switch strip power together with the staircase lights
    pub toggle_power: bool,
    /// Seconds to stay lit after the on-wipe, 0 = until released
    pub hold_s: u16,
    /// Wipe animation speed (0 slowest, 255 fastest)
    pub wipe_speed: u8,
    /// Play a reverse wipe instead of switching straight off
    pub wipe_off: bool,
    /// Above this illuminance (lux) the sensors are ignored
    pub daylight_lux: f32,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            top: SensorConfig::default(),
            bottom: SensorConfig::default(),
            toggle_power: false,
            hold_s: DEFAULT_HOLD_S,
            wipe_speed: DEFAULT_WIPE_SPEED,
            wipe_off: false,
            daylight_lux: DEFAULT_DAYLIGHT_LUX,
        }
    }
}

impl StaircaseConfig {
    /// Apply range clamping to both sensors
    pub fn normalized(mut self) -> Self {
        self.top = self.top.normalized();
        self.bottom = self.bottom.normalized();
        self
    }

    /// True when either sensor's wiring differs from `other`
    pub fn wiring_differs(&self, other: &StaircaseConfig) -> bool {
        self.top.wiring_differs(&other.top) || self.bottom.wiring_differs(&other.bottom)
    }

    /// Hold duration in milliseconds
    pub fn hold_ms(&self) -> u32 {
        u32::from(self.hold_s) * 1000
    }
}
