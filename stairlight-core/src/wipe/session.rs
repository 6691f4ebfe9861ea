//! One activation of the wipe animation
//!
//! The session owns the wipe state and its timers and pushes the effect
//! parameters to the renderer whenever the state machine moves.

use crate::config::StaircaseConfig;
use crate::fusion::Direction;
use crate::traits::{Effect, Renderer};

use super::machine::{WipeEvent, WipeState};
use super::timing::{cycle_duration_ms, wipe_off_duration_ms, wipe_on_duration_ms};

/// Fade used when switching off without an off-wipe (ms)
pub const FADE_OUT_MS: u16 = 4000;

/// Request fed into the session each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WipeRequest {
    /// Someone is walking in this direction
    Toward(Direction),
    /// Direction cleared: leave the lit state
    Release,
}

/// What a session update did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WipeOutcome {
    /// A wipe started in this direction
    pub started: Option<Direction>,
    /// The lights were switched off
    pub turned_off: bool,
    /// A request was dropped because both colors are black
    pub dropped: bool,
}

/// Wipe session state
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WipeSession {
    state: WipeState,
    /// Direction fixed at wipe start
    direction: Option<Direction>,
    /// Most recent request seen during the session, used for the off-wipe
    previous: Option<Direction>,
    /// Time the on-wipe started
    started_ms: u32,
    /// Time the hold timer (re)started
    hold_start_ms: u32,
    /// Time the off-wipe started
    off_started_ms: u32,
}

impl WipeSession {
    /// Create an inactive session
    pub const fn new() -> Self {
        Self {
            state: WipeState::Inactive,
            direction: None,
            previous: None,
            started_ms: 0,
            hold_start_ms: 0,
            off_started_ms: 0,
        }
    }

    /// Current wipe state
    pub fn state(&self) -> WipeState {
        self.state
    }

    /// Direction of the running session
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Time the hold timer last started
    pub fn hold_start_ms(&self) -> u32 {
        self.hold_start_ms
    }

    /// Restart the hold timer
    ///
    /// Called while the lights are on and only one side detects, which
    /// keeps the stairs lit while someone is still on them.
    pub fn restart_hold(&mut self, now_ms: u32) {
        self.hold_start_ms = now_ms;
    }

    /// Consume a request and advance the timers
    pub fn update<R: Renderer>(
        &mut self,
        now_ms: u32,
        request: Option<WipeRequest>,
        config: &StaircaseConfig,
        renderer: &mut R,
    ) -> WipeOutcome {
        let mut outcome = WipeOutcome::default();

        match request {
            Some(WipeRequest::Toward(direction)) => {
                if !renderer.has_visible_colors() {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Both colors black, wipe request dropped");
                    outcome.dropped = true;
                } else {
                    self.previous = Some(direction);
                    if self.state == WipeState::Inactive {
                        self.start(now_ms, direction, config, renderer);
                        outcome.started = Some(direction);
                    }
                }
            }
            Some(WipeRequest::Release) => {
                if self.state.is_active() {
                    self.set_state(WipeEvent::Release);
                    self.leave(now_ms, config, renderer, &mut outcome);
                }
                self.previous = None;
            }
            None => {}
        }

        self.advance(now_ms, config, renderer, &mut outcome);
        outcome
    }

    /// Switch the lights off and end the session
    ///
    /// Returns false if no session was running.
    pub fn force_off<R: Renderer>(&mut self, config: &StaircaseConfig, renderer: &mut R) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.turn_off(config, renderer);
        true
    }

    /// Time-driven transitions
    fn advance<R: Renderer>(
        &mut self,
        now_ms: u32,
        config: &StaircaseConfig,
        renderer: &mut R,
        outcome: &mut WipeOutcome,
    ) {
        match self.state {
            WipeState::Inactive => {}
            WipeState::WipingOn => {
                let elapsed = now_ms.wrapping_sub(self.started_ms);
                if elapsed >= wipe_on_duration_ms(config.wipe_speed) {
                    renderer.set_effect(Effect::Static);
                    renderer.color_updated();
                    self.hold_start_ms = now_ms;
                    self.set_state(WipeEvent::WipeOnDone);
                }
            }
            WipeState::Solid => {
                let hold_ms = config.hold_ms();
                // Zero hold keeps the lights on until released
                if hold_ms > 0 && now_ms.wrapping_sub(self.hold_start_ms) >= hold_ms {
                    self.set_state(WipeEvent::HoldExpired);
                    self.leave(now_ms, config, renderer, outcome);
                }
            }
            WipeState::WipingOff => {
                let elapsed = now_ms.wrapping_sub(self.off_started_ms);
                if elapsed >= wipe_off_duration_ms(config.wipe_speed) {
                    self.set_state(WipeEvent::WipeOffDone);
                }
            }
            WipeState::Complete => {
                self.turn_off(config, renderer);
                outcome.turned_off = true;
            }
        }
    }

    /// Light the strip with a wipe in `direction`
    fn start<R: Renderer>(
        &mut self,
        now_ms: u32,
        direction: Direction,
        config: &StaircaseConfig,
        renderer: &mut R,
    ) {
        renderer.set_brightness(renderer.last_on_brightness());
        renderer.set_transition(0);
        renderer.set_effect(Effect::ColorWipe);
        renderer.reset_animation_clock();
        renderer.set_speed(config.wipe_speed);
        renderer.set_reversed(direction.is_reversed());
        renderer.color_updated();

        self.direction = Some(direction);
        self.started_ms = now_ms;
        self.set_state(WipeEvent::Start(direction));
    }

    /// Entered WipingOff: play the off-wipe or go dark right away
    fn leave<R: Renderer>(
        &mut self,
        now_ms: u32,
        config: &StaircaseConfig,
        renderer: &mut R,
        outcome: &mut WipeOutcome,
    ) {
        if !config.wipe_off {
            self.turn_off(config, renderer);
            outcome.turned_off = true;
            return;
        }

        let direction = self.previous.or(self.direction).unwrap_or(Direction::Up);
        renderer.set_effect(Effect::ColorWipe);
        // Start the clearing half of the wipe with the strip fully lit
        renderer.seek_animation_clock(cycle_duration_ms(config.wipe_speed));
        renderer.set_reversed(direction.is_reversed());
        renderer.color_updated();
        self.off_started_ms = now_ms;
    }

    fn turn_off<R: Renderer>(&mut self, config: &StaircaseConfig, renderer: &mut R) {
        renderer.set_transition(if config.wipe_off { 0 } else { FADE_OUT_MS });
        renderer.set_brightness(0);
        renderer.state_updated();

        self.set_state(WipeEvent::TurnedOff);
        *self = Self::new();
    }

    fn set_state(&mut self, event: WipeEvent) {
        let next = self.state.transition(event);
        #[cfg(feature = "defmt")]
        {
            if next != self.state {
                defmt::debug!("Wipe {} -> {} on {}", self.state, next, event);
            }
        }
        self.state = next;
    }
}
