//! Staircase module
//!
//! The aggregate the host drives: it owns the settings, the fusion and wipe
//! state and the injected collaborators, and runs one tick per main-loop
//! iteration.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► load (optional) ──► setup ──► tick, tick, tick ...
//!                                 ▲          │
//!                                 └── reconfigure (pins changed)
//! ```

use crate::config::{self, ConfigError, SensorConfig, SensorKind, StaircaseConfig};
use crate::fusion::{PollOutcome, SensorFusion, Side};
use crate::messaging::{Command, SUBSCRIPTIONS};
use crate::traits::{
    AmbientLight, NoAmbientLight, PinArbiter, PinMode, PinRequest, Publisher, Renderer, SensorIo,
    SettingsStore,
};
use crate::wipe::{WipeOutcome, WipeRequest, WipeSession, WipeState};

/// Name the module is exposed under in state and info documents
pub const MODULE_NAME: &str = "staircase";

/// Sensor state exposed to the state API
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateSnapshot {
    /// Latest bottom sensor read
    pub bottom_sensor: bool,
    /// Latest top sensor read
    pub top_sensor: bool,
    /// Current illuminance, if an ambient sensor is attached
    pub lux: Option<f32>,
}

/// State written through the state API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateUpdate {
    /// Enable or disable the module
    pub enabled: Option<bool>,
    /// Force the bottom sensor to detect on the next scan
    pub bottom_sensor: bool,
    /// Force the top sensor to detect on the next scan
    pub top_sensor: bool,
    /// Drive the wipe directly
    pub wipe: Option<WipeRequest>,
}

impl StateUpdate {
    /// Interpret a checkbox-style enable value; anything but "off" enables
    pub fn parse_enabled(value: &str) -> bool {
        value != "off"
    }
}

/// Info surface entry: a single enable toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleInfo {
    /// Module name
    pub name: &'static str,
    /// Current enable state; the toggle writes the inverse
    pub enabled: bool,
}

impl ModuleInfo {
    /// State update the toggle button sends
    pub fn toggle(&self) -> StateUpdate {
        StateUpdate {
            enabled: Some(!self.enabled),
            ..StateUpdate::default()
        }
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    pub poll: PollOutcome,
    pub wipe: WipeOutcome,
}

/// Staircase lighting module
pub struct Staircase<I, R, P, A = NoAmbientLight> {
    config: StaircaseConfig,
    io: I,
    renderer: R,
    publisher: P,
    ambient: Option<A>,
    fusion: SensorFusion,
    wipe: WipeSession,
    /// Wipe request written through the state API
    queued: Option<WipeRequest>,
    /// Setup has run at least once
    initialized: bool,
}

impl<I, R, P> Staircase<I, R, P, NoAmbientLight>
where
    I: SensorIo,
    R: Renderer,
    P: Publisher,
{
    /// Create the module; nothing is polled until [`Staircase::setup`]
    pub fn new(config: StaircaseConfig, io: I, renderer: R, publisher: P) -> Self {
        Self {
            config: config.normalized(),
            io,
            renderer,
            publisher,
            ambient: None,
            fusion: SensorFusion::new(),
            wipe: WipeSession::new(),
            queued: None,
            initialized: false,
        }
    }
}

impl<I, R, P, A> Staircase<I, R, P, A>
where
    I: SensorIo,
    R: Renderer,
    P: Publisher,
    A: AmbientLight,
{
    /// Attach an ambient light sensor for daylight suppression
    pub fn with_ambient<B: AmbientLight>(self, ambient: B) -> Staircase<I, R, P, B> {
        Staircase {
            config: self.config,
            io: self.io,
            renderer: self.renderer,
            publisher: self.publisher,
            ambient: Some(ambient),
            fusion: self.fusion,
            wipe: self.wipe,
            queued: self.queued,
            initialized: self.initialized,
        }
    }

    /// Active settings
    pub fn config(&self) -> &StaircaseConfig {
        &self.config
    }

    /// Check if the module is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Current wipe state
    pub fn wipe_state(&self) -> WipeState {
        self.wipe.state()
    }

    /// Fusion state
    pub fn fusion(&self) -> &SensorFusion {
        &self.fusion
    }

    /// Wipe session
    pub fn wipe(&self) -> &WipeSession {
        &self.wipe
    }

    /// Injected renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Injected renderer, mutably
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Injected sensor I/O
    pub fn io(&self) -> &I {
        &self.io
    }

    /// Injected sensor I/O, mutably
    pub fn io_mut(&mut self) -> &mut I {
        &mut self.io
    }

    /// Injected publisher
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Claim the sensor pins and apply the enable flag
    ///
    /// Unassigned pins are skipped, so a fully unwired configuration
    /// succeeds and stays inert. If the arbiter refuses, every pin is
    /// unassigned and the module is disabled.
    pub fn setup<T: PinArbiter>(&mut self, arbiter: &mut T) {
        let requests = pin_requests(&self.config);
        if !arbiter.allocate(&requests) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Staircase pins unavailable, module disabled");
            self.config.top.unassign_pins();
            self.config.bottom.unassign_pins();
            self.config.enabled = false;
        }
        self.initialized = true;
        self.enable(self.config.enabled);
    }

    /// Enable or disable polling
    ///
    /// Enabling puts the sensor pins into their modes. Disabling switches
    /// the lights off if a wipe is running. Before setup only the flag is
    /// stored; the pins are configured once setup has claimed them.
    pub fn enable(&mut self, enabled: bool) {
        if !self.initialized {
            self.config.enabled = enabled;
            return;
        }
        if enabled {
            configure_pins(&self.config.bottom, &mut self.io);
            configure_pins(&self.config.top, &mut self.io);
            #[cfg(feature = "defmt")]
            defmt::info!("Staircase enabled");
        } else {
            self.turn_off();
        }
        self.config.enabled = enabled;
    }

    /// Run one polling tick
    ///
    /// Skipped before setup, while disabled or while the renderer is
    /// pushing a frame.
    pub fn tick(&mut self, now_ms: u32) -> TickOutcome {
        if !self.initialized || !self.config.enabled || self.renderer.is_updating() {
            return TickOutcome::default();
        }

        let poll = self.fusion.poll(
            now_ms,
            &self.config,
            &mut self.io,
            self.ambient.as_mut(),
            &mut self.publisher,
        );
        if let Some(at_ms) = poll.hold_restarted_at {
            self.wipe.restart_hold(at_ms);
        }

        let request = match self.fusion.take_direction() {
            Some(direction) => Some(WipeRequest::Toward(direction)),
            None => self.queued.take(),
        };
        let wipe = self
            .wipe
            .update(now_ms, request, &self.config, &mut self.renderer);

        if !self.wipe.state().is_active() {
            self.fusion.lights_off();
        }

        TickOutcome { poll, wipe }
    }

    /// Apply new settings
    ///
    /// Before setup the settings are only stored. Afterwards a change of
    /// any sensor kind or pin releases the old pins and re-runs setup.
    /// Returns true if setup was re-run.
    pub fn reconfigure<T: PinArbiter>(&mut self, config: StaircaseConfig, arbiter: &mut T) -> bool {
        let old = self.config;
        self.config = config.normalized();

        if !self.initialized {
            return false;
        }

        if old.wiring_differs(&self.config) {
            for pin in assigned_pins(&old) {
                arbiter.release(pin);
            }
            self.fusion.reset();
            self.setup(arbiter);
            return true;
        }

        if old.enabled != self.config.enabled {
            self.enable(self.config.enabled);
        }
        false
    }

    /// Load settings from the store and apply them
    ///
    /// Returns false when nothing was stored and defaults stay in place.
    pub fn load<S, T>(&mut self, store: &mut S, arbiter: &mut T) -> Result<bool, ConfigError>
    where
        S: SettingsStore,
        T: PinArbiter,
    {
        match config::load(store)? {
            Some(config) => {
                self.reconfigure(config, arbiter);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save the active settings
    pub fn save<S: SettingsStore>(&self, store: &mut S) -> Result<(), ConfigError> {
        config::save(store, &self.config)
    }

    /// Sensor state for the state API
    pub fn snapshot(&mut self) -> StateSnapshot {
        StateSnapshot {
            bottom_sensor: self.fusion.channel(Side::Bottom).last_read(),
            top_sensor: self.fusion.channel(Side::Top).last_read(),
            lux: self.ambient.as_mut().and_then(|a| a.illuminance()),
        }
    }

    /// Apply a state API write; ignored before setup
    pub fn apply_state(&mut self, update: StateUpdate) {
        if !self.initialized {
            return;
        }

        if let Some(enabled) = update.enabled {
            if enabled != self.config.enabled {
                self.enable(enabled);
            }
        }

        self.fusion
            .channel_mut(Side::Bottom)
            .merge_override(update.bottom_sensor);
        self.fusion
            .channel_mut(Side::Top)
            .merge_override(update.top_sensor);

        if update.wipe.is_some() {
            self.queued = update.wipe;
        }
    }

    /// Info surface entry
    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            name: MODULE_NAME,
            enabled: self.config.enabled,
        }
    }

    /// Execute a remote command; ignored before setup
    pub fn handle_command(&mut self, command: Command) {
        if !self.initialized {
            return;
        }
        match command {
            Command::WipeUp => self.fusion.channel_mut(Side::Bottom).force_detected(),
            Command::WipeDown => self.fusion.channel_mut(Side::Top).force_detected(),
            Command::Enable => self.enable(true),
            Command::Disable => self.enable(false),
        }
    }

    /// Topic filters the transport should subscribe to
    pub fn subscriptions(&self) -> &'static [&'static str] {
        SUBSCRIPTIONS
    }

    /// Handle an incoming message; returns false if it is not ours
    pub fn handle_message(&mut self, topic: &str, payload: &str) -> bool {
        match Command::parse(topic, payload) {
            Some(command) => {
                self.handle_command(command);
                true
            }
            None => false,
        }
    }

    /// Switch the lights off from outside; returns false if they were off
    pub fn turn_off(&mut self) -> bool {
        let was_on = self.wipe.force_off(&self.config, &mut self.renderer);
        if was_on {
            self.fusion.lights_off();
        }
        was_on
    }
}

/// Pins in arbiter order: top trigger, top echo, bottom trigger, bottom echo
fn pin_requests(config: &StaircaseConfig) -> [PinRequest; 4] {
    let sensor = |s: &SensorConfig| {
        let ultrasonic = s.kind == SensorKind::Ultrasonic;
        [
            PinRequest::new(s.trigger_pin, ultrasonic),
            PinRequest::new(if ultrasonic { s.echo_pin } else { None }, false),
        ]
    };
    let [top_trigger, top_echo] = sensor(&config.top);
    let [bottom_trigger, bottom_echo] = sensor(&config.bottom);
    [top_trigger, top_echo, bottom_trigger, bottom_echo]
}

fn assigned_pins(config: &StaircaseConfig) -> impl Iterator<Item = u8> {
    [
        config.top.trigger_pin,
        config.top.echo_pin,
        config.bottom.trigger_pin,
        config.bottom.echo_pin,
    ]
    .into_iter()
    .flatten()
}

fn configure_pins<I: SensorIo>(sensor: &SensorConfig, io: &mut I) {
    match sensor.kind {
        SensorKind::Trigger => {
            if let Some(pin) = sensor.trigger_pin {
                io.configure(pin, PinMode::InputPullDown);
            }
        }
        SensorKind::Ultrasonic => {
            if let Some(pin) = sensor.trigger_pin {
                io.configure(pin, PinMode::Output);
            }
            if let Some(pin) = sensor.echo_pin {
                io.configure(pin, PinMode::Input);
            }
        }
    }
}
