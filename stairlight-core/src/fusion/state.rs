//! Combined read of both sensors
//!
//! Polled once per tick. Reads are rate limited by the scan interval, which
//! stretches tenfold while the lights are on.

use crate::config::StaircaseConfig;
use crate::messaging::Event;
use crate::traits::{AmbientLight, Publisher, SensorIo};

use super::channel::SensorChannel;
use super::side::{Direction, Side};

/// Time between sensor reads while the lights are off (ms)
pub const SCAN_INTERVAL_MS: u32 = 100;

/// Time between sensor reads while the lights are on (ms)
pub const SCAN_INTERVAL_LIT_MS: u32 = SCAN_INTERVAL_MS * 10;

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// Bottom sensor changed state
    pub bottom_changed: bool,
    /// Top sensor changed state
    pub top_changed: bool,
    /// Lights were on with the sides disagreeing; hold restarts here
    pub hold_restarted_at: Option<u32>,
    /// Lights were off with the sides disagreeing; they are now on
    pub lights_requested: bool,
    /// Poll skipped because of daylight
    pub suppressed: bool,
}

impl PollOutcome {
    /// Check if either sensor changed
    pub fn changed(&self) -> bool {
        self.bottom_changed || self.top_changed
    }
}

/// Fusion of the top and bottom sensor
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFusion {
    bottom: SensorChannel,
    top: SensorChannel,
    /// Time of the last scan, None until the first one
    last_scan_ms: Option<u32>,
    /// Side that detected most recently
    last_side: Side,
    /// Direction waiting to be consumed by the wipe
    pending: Option<Direction>,
    /// Lights are logically on
    lights_on: bool,
}

impl Default for SensorFusion {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorFusion {
    /// Create fusion state with both sensors idle
    pub const fn new() -> Self {
        Self {
            bottom: SensorChannel::new(),
            top: SensorChannel::new(),
            last_scan_ms: None,
            last_side: Side::Bottom,
            pending: None,
            lights_on: false,
        }
    }

    /// Channel for one side
    pub fn channel(&self, side: Side) -> &SensorChannel {
        match side {
            Side::Bottom => &self.bottom,
            Side::Top => &self.top,
        }
    }

    /// Mutable channel for one side
    pub fn channel_mut(&mut self, side: Side) -> &mut SensorChannel {
        match side {
            Side::Bottom => &mut self.bottom,
            Side::Top => &mut self.top,
        }
    }

    /// Side that detected most recently
    pub fn last_side(&self) -> Side {
        self.last_side
    }

    /// Check if the lights are logically on
    pub fn lights_on(&self) -> bool {
        self.lights_on
    }

    /// Direction waiting to be consumed, without consuming it
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Consume the pending direction request
    pub fn take_direction(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    /// Mark the lights as off after the wipe turned them off
    pub fn lights_off(&mut self) {
        self.lights_on = false;
    }

    /// Current scan interval
    pub fn scan_interval_ms(&self) -> u32 {
        if self.lights_on {
            SCAN_INTERVAL_LIT_MS
        } else {
            SCAN_INTERVAL_MS
        }
    }

    /// Forget all runtime state (module re-enabled)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Poll both sensors
    ///
    /// Does nothing until the scan interval has elapsed since the previous
    /// scan, so the ambient sensor is read at most once per interval. With
    /// it above the daylight threshold, overrides are dropped and nothing
    /// is reported.
    pub fn poll<I, A, P>(
        &mut self,
        now_ms: u32,
        config: &StaircaseConfig,
        io: &mut I,
        ambient: Option<&mut A>,
        publisher: &mut P,
    ) -> PollOutcome
    where
        I: SensorIo,
        A: AmbientLight,
        P: Publisher,
    {
        let mut outcome = PollOutcome::default();

        if let Some(last) = self.last_scan_ms {
            if now_ms.wrapping_sub(last) < self.scan_interval_ms() {
                return outcome;
            }
        }
        self.last_scan_ms = Some(now_ms);

        if let Some(lux) = ambient.and_then(|a| a.illuminance()) {
            if lux > config.daylight_lux {
                self.bottom.clear_override();
                self.top.clear_override();
                outcome.suppressed = true;
                #[cfg(feature = "defmt")]
                defmt::trace!("Daylight ({} lx), sensors ignored", lux);
                return outcome;
            }
        }

        let bottom_read = self.bottom.sample(&config.bottom, io);
        let top_read = self.top.sample(&config.top, io);

        // Bottom first: simultaneous detection resolves toward the bottom
        outcome.bottom_changed = self.apply(Side::Bottom, bottom_read, publisher);
        outcome.top_changed = self.apply(Side::Top, top_read, publisher);

        self.bottom.clear_override();
        self.top.clear_override();

        if bottom_read != top_read {
            if self.lights_on {
                outcome.hold_restarted_at = Some(now_ms);
                Event::HoldRestarted {
                    side: self.last_side,
                    at_ms: now_ms,
                }
                .publish(publisher);
            } else {
                self.lights_on = true;
                outcome.lights_requested = true;
            }
        }

        outcome
    }

    /// Store a fresh read for one side and fire side effects on change
    fn apply<P: Publisher>(&mut self, side: Side, read: bool, publisher: &mut P) -> bool {
        if !self.channel_mut(side).update(read) {
            return false;
        }

        Event::Motion {
            side,
            detected: read,
        }
        .publish(publisher);

        if read {
            self.pending = Some(side.direction());
            self.last_side = side;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("{} sensor changed: {}", side, read);

        true
    }
}
