//! Property tests for the staircase tick

use proptest::prelude::*;

use stairlight_core::config::{SensorConfig, StaircaseConfig};
use stairlight_core::fusion::Direction;
use stairlight_core::traits::{Color, Effect, PinMode, Publisher, Renderer, SensorIo};
use stairlight_core::traits::{AmbientLight, PinArbiter, PinRequest};
use stairlight_core::wipe::{wipe_on_duration_ms, WipeState};
use stairlight_core::Staircase;

const BOTTOM_PIN: u8 = 2;
const TOP_PIN: u8 = 3;

struct Io {
    levels: [bool; 8],
    echo: bool,
}

impl SensorIo for Io {
    fn configure(&mut self, _pin: u8, _mode: PinMode) {}

    fn read_level(&mut self, pin: u8) -> bool {
        self.levels.get(pin as usize).copied().unwrap_or(false)
    }

    fn ping(&mut self, _trigger: u8, _echo: u8, _timeout_us: u32) -> bool {
        self.echo
    }
}

struct Strip {
    effect: Effect,
    brightness: u8,
    reversed: bool,
}

impl Renderer for Strip {
    fn primary_color(&self) -> Color {
        Color::rgbw(255, 255, 255, 0)
    }

    fn secondary_color(&self) -> Color {
        Color::BLACK
    }

    fn effect(&self) -> Effect {
        self.effect
    }

    fn set_effect(&mut self, effect: Effect) {
        self.effect = effect;
    }

    fn speed(&self) -> u8 {
        0
    }

    fn set_speed(&mut self, _speed: u8) {}

    fn reset_animation_clock(&mut self) {}

    fn seek_animation_clock(&mut self, _offset_ms: u32) {}

    fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    fn set_transition(&mut self, _duration_ms: u16) {}

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn last_on_brightness(&self) -> u8 {
        200
    }

    fn color_updated(&mut self) {}

    fn state_updated(&mut self) {}
}

struct Sink;

impl Publisher for Sink {
    fn publish(&mut self, _topic: &str, _payload: &str) {}
}

struct Sun(f32);

impl AmbientLight for Sun {
    fn illuminance(&mut self) -> Option<f32> {
        Some(self.0)
    }
}

struct AnyPin;

impl PinArbiter for AnyPin {
    fn allocate(&mut self, _requests: &[PinRequest]) -> bool {
        true
    }

    fn release(&mut self, _pin: u8) {}
}

fn strip() -> Strip {
    Strip {
        effect: Effect::Static,
        brightness: 0,
        reversed: false,
    }
}

fn wired(wipe_speed: u8, hold_s: u16) -> StaircaseConfig {
    let mut config = StaircaseConfig::default();
    config.enabled = true;
    config.bottom = SensorConfig::trigger(BOTTOM_PIN);
    config.top = SensorConfig::trigger(TOP_PIN);
    config.wipe_speed = wipe_speed;
    config.hold_s = hold_s;
    config
}

fn io() -> Io {
    Io {
        levels: [false; 8],
        echo: false,
    }
}

proptest! {
    #[test]
    fn test_unwired_never_lights(
        levels in prop::array::uniform8(any::<bool>()),
        echo in any::<bool>(),
        steps in prop::collection::vec(1u32..2000, 1..50),
    ) {
        let mut config = StaircaseConfig::default();
        config.enabled = true;
        let mut staircase = Staircase::new(config, Io { levels, echo }, strip(), Sink);
        staircase.setup(&mut AnyPin);

        let mut now = 0u32;
        for step in steps {
            now = now.wrapping_add(step);
            let outcome = staircase.tick(now);
            prop_assert!(!outcome.poll.changed());
            prop_assert_eq!(outcome.wipe.started, None);
        }
        prop_assert_eq!(staircase.wipe_state(), WipeState::Inactive);
        prop_assert_eq!(staircase.renderer().brightness, 0);
    }

    #[test]
    fn test_wipe_on_ends_at_switch_point(speed in any::<u8>(), start in any::<u32>()) {
        let mut staircase = Staircase::new(wired(speed, 20), io(), strip(), Sink);
        staircase.setup(&mut AnyPin);
        staircase.io_mut().levels[BOTTOM_PIN as usize] = true;

        prop_assert_eq!(staircase.tick(start).wipe.started, Some(Direction::Up));

        let on_ms = wipe_on_duration_ms(speed);
        staircase.tick(start.wrapping_add(on_ms - 1));
        prop_assert_eq!(staircase.wipe_state(), WipeState::WipingOn);
        staircase.tick(start.wrapping_add(on_ms));
        prop_assert_eq!(staircase.wipe_state(), WipeState::Solid);
        prop_assert_eq!(staircase.renderer().effect, Effect::Static);
    }

    #[test]
    fn test_zero_hold_stays_lit(
        speed in any::<u8>(),
        top_first in any::<bool>(),
        later in prop::collection::vec(1u32..100_000, 1..30),
    ) {
        let mut staircase = Staircase::new(wired(speed, 0), io(), strip(), Sink);
        staircase.setup(&mut AnyPin);
        let pin = if top_first { TOP_PIN } else { BOTTOM_PIN };
        staircase.io_mut().levels[pin as usize] = true;
        staircase.tick(0);
        staircase.io_mut().levels[pin as usize] = false;

        let mut now = wipe_on_duration_ms(speed);
        staircase.tick(now);
        prop_assert_eq!(staircase.wipe_state(), WipeState::Solid);
        prop_assert_eq!(staircase.renderer().reversed, top_first);

        for step in later {
            now = now.wrapping_add(step);
            staircase.tick(now);
            prop_assert_eq!(staircase.wipe_state(), WipeState::Solid);
        }
    }

    #[test]
    fn test_daylight_suppresses_detection(
        threshold in 0.0f32..1000.0,
        excess in 0.5f32..1000.0,
        bottom in any::<bool>(),
        top in any::<bool>(),
    ) {
        let mut config = wired(225, 20);
        config.daylight_lux = threshold;
        let mut staircase = Staircase::new(config, io(), strip(), Sink)
            .with_ambient(Sun(threshold + excess));
        staircase.setup(&mut AnyPin);
        staircase.io_mut().levels[BOTTOM_PIN as usize] = bottom;
        staircase.io_mut().levels[TOP_PIN as usize] = top;

        for t in 0..20 {
            let outcome = staircase.tick(t * 100);
            prop_assert!(outcome.poll.suppressed);
            prop_assert!(!outcome.poll.changed());
        }
        prop_assert_eq!(staircase.wipe_state(), WipeState::Inactive);
    }
}
