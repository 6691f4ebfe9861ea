//! Wipe state machine definition
//!
//! All renderer behavior is a function of the current state and an event.

use crate::fusion::Direction;

/// Wipe states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WipeState {
    /// Lights off, waiting for a direction request
    #[default]
    Inactive,
    /// Wipe filling the strip
    WipingOn,
    /// Strip fully lit, hold timer running
    Solid,
    /// Leaving the lit state, off-wipe playing if configured
    WipingOff,
    /// Off-wipe finished, lights go dark on the next update
    Complete,
}

/// Events that drive the wipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WipeEvent {
    /// Someone entered the stairs
    Start(Direction),
    /// The on-wipe has filled the strip
    WipeOnDone,
    /// The hold time ran out
    HoldExpired,
    /// The direction request was cleared
    Release,
    /// The off-wipe has cleared the strip
    WipeOffDone,
    /// Lights switched off
    TurnedOff,
}

impl WipeState {
    /// Check if a session is running
    pub fn is_active(&self) -> bool {
        !matches!(self, WipeState::Inactive)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: WipeEvent) -> Self {
        use WipeEvent::*;
        use WipeState::*;

        match (self, event) {
            (Inactive, Start(_)) => WipingOn,

            (WipingOn, WipeOnDone) => Solid,

            (Solid, HoldExpired) => WipingOff,

            // Release re-enters WipingOff from anywhere in a session,
            // restarting an off-wipe already in progress
            (WipingOn | Solid | WipingOff | Complete, Release) => WipingOff,

            (WipingOff, WipeOffDone) => Complete,

            (_, TurnedOff) => Inactive,

            // Default: stay in current state
            _ => self,
        }
    }
}
