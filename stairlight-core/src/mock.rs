//! Test doubles for the collaborator traits

extern crate std;

use std::string::{String, ToString};
use std::vec::Vec;

use crate::traits::{
    AmbientLight, Color, Effect, PinArbiter, PinMode, PinRequest, Publisher, Renderer, SensorIo,
    SettingsStore, StorageKey, StoreError,
};

/// Pin levels and a scripted ultrasonic echo
pub struct MockIo {
    pub levels: [bool; 40],
    pub modes: Vec<(u8, PinMode)>,
    pub echo: bool,
    pub last_ping: Option<(u8, u8, u32)>,
}

impl MockIo {
    pub fn new() -> Self {
        Self {
            levels: [false; 40],
            modes: Vec::new(),
            echo: false,
            last_ping: None,
        }
    }

    pub fn set_level(&mut self, pin: u8, high: bool) {
        self.levels[pin as usize] = high;
    }

    pub fn mode_of(&self, pin: u8) -> Option<PinMode> {
        self.modes
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, mode)| *mode)
    }
}

impl SensorIo for MockIo {
    fn configure(&mut self, pin: u8, mode: PinMode) {
        self.modes.push((pin, mode));
    }

    fn read_level(&mut self, pin: u8) -> bool {
        self.levels[pin as usize]
    }

    fn ping(&mut self, trigger: u8, echo: u8, timeout_us: u32) -> bool {
        self.last_ping = Some((trigger, echo, timeout_us));
        self.echo
    }
}

/// Renderer that records what it was told
pub struct MockRenderer {
    pub primary: Color,
    pub secondary: Color,
    pub effect: Effect,
    pub speed: u8,
    pub reversed: bool,
    pub transition_ms: u16,
    pub brightness: u8,
    pub last_on: u8,
    pub clock_resets: u32,
    pub clock_offset_ms: Option<u32>,
    pub color_updates: u32,
    pub state_updates: u32,
    pub updating: bool,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            primary: Color::rgbw(255, 160, 0, 0),
            secondary: Color::BLACK,
            effect: Effect::Static,
            speed: 128,
            reversed: false,
            transition_ms: 700,
            brightness: 0,
            last_on: 128,
            clock_resets: 0,
            clock_offset_ms: None,
            color_updates: 0,
            state_updates: 0,
            updating: false,
        }
    }
}

impl Renderer for MockRenderer {
    fn primary_color(&self) -> Color {
        self.primary
    }

    fn secondary_color(&self) -> Color {
        self.secondary
    }

    fn effect(&self) -> Effect {
        self.effect
    }

    fn set_effect(&mut self, effect: Effect) {
        self.effect = effect;
    }

    fn speed(&self) -> u8 {
        self.speed
    }

    fn set_speed(&mut self, speed: u8) {
        self.speed = speed;
    }

    fn reset_animation_clock(&mut self) {
        self.clock_resets += 1;
        self.clock_offset_ms = Some(0);
    }

    fn seek_animation_clock(&mut self, offset_ms: u32) {
        self.clock_offset_ms = Some(offset_ms);
    }

    fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    fn set_transition(&mut self, duration_ms: u16) {
        self.transition_ms = duration_ms;
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn last_on_brightness(&self) -> u8 {
        self.last_on
    }

    fn color_updated(&mut self) {
        self.color_updates += 1;
    }

    fn state_updated(&mut self) {
        self.state_updates += 1;
    }

    fn is_updating(&self) -> bool {
        self.updating
    }
}

/// Publisher that keeps every message
pub struct MockPublisher {
    pub connected: bool,
    pub messages: Vec<(String, String)>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            connected: true,
            messages: Vec::new(),
        }
    }

    pub fn topics(&self) -> Vec<&str> {
        self.messages.iter().map(|(t, _)| t.as_str()).collect()
    }
}

impl Publisher for MockPublisher {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, topic: &str, payload: &str) {
        self.messages.push((topic.to_string(), payload.to_string()));
    }
}

/// Ambient light sensor with a settable reading
pub struct MockAmbient {
    pub lux: Option<f32>,
    pub reads: u32,
}

impl MockAmbient {
    pub fn new(lux: Option<f32>) -> Self {
        Self { lux, reads: 0 }
    }
}

impl AmbientLight for MockAmbient {
    fn illuminance(&mut self) -> Option<f32> {
        self.reads += 1;
        self.lux
    }
}

/// Arbiter that tracks owned pins and can refuse specific ones
pub struct MockArbiter {
    pub owned: Vec<u8>,
    pub refused: Vec<u8>,
    pub released: Vec<u8>,
}

impl MockArbiter {
    pub fn new() -> Self {
        Self {
            owned: Vec::new(),
            refused: Vec::new(),
            released: Vec::new(),
        }
    }
}

impl PinArbiter for MockArbiter {
    fn allocate(&mut self, requests: &[PinRequest]) -> bool {
        let pins = requests.iter().filter_map(|r| r.pin);
        if pins
            .clone()
            .any(|p| self.refused.contains(&p) || self.owned.contains(&p))
        {
            return false;
        }
        self.owned.extend(pins);
        true
    }

    fn release(&mut self, pin: u8) {
        self.owned.retain(|p| *p != pin);
        self.released.push(pin);
    }
}

/// In-memory settings store
pub struct MockStore {
    pub data: Option<Vec<u8>>,
    pub fail_with: Option<StoreError>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            data: None,
            fail_with: None,
        }
    }
}

impl SettingsStore for MockStore {
    fn read(&mut self, _key: StorageKey, buffer: &mut [u8]) -> Result<usize, StoreError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        let data = self.data.as_ref().ok_or(StoreError::NotFound)?;
        if data.len() > buffer.len() {
            return Err(StoreError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, _key: StorageKey, data: &[u8]) -> Result<(), StoreError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.data = Some(data.to_vec());
        Ok(())
    }
}
