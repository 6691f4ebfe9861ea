//! Messaging commands and events
//!
//! Commands arrive on a single topic relative to the device topic:
//!
//! ```text
//! <device>/wipe   up | down | on | off
//! ```
//!
//! Events are published on sensor changes and hold-timer restarts:
//!
//! ```text
//! <device>/motion/bot        on | off
//! <device>/motion/top        on | off
//! <device>/motion_time/bot   <timestamp ms>
//! <device>/motion_time/top   <timestamp ms>
//! ```

use core::fmt::Write;

use heapless::String;

use crate::fusion::Side;
use crate::traits::Publisher;

/// Topic commands are received on
pub const COMMAND_TOPIC: &str = "/wipe";

/// Topic filters the transport should subscribe to
pub const SUBSCRIPTIONS: &[&str] = &[COMMAND_TOPIC];

/// Maximum relative topic length
pub const MAX_TOPIC_LEN: usize = 24;

/// Maximum payload length
pub const MAX_PAYLOAD_LEN: usize = 12;

/// Remote command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Act as if the bottom sensor fired
    WipeUp,
    /// Act as if the top sensor fired
    WipeDown,
    /// Enable the module
    Enable,
    /// Disable the module
    Disable,
}

impl Command {
    /// Parse a command from a relative topic and its payload
    pub fn parse(topic: &str, payload: &str) -> Option<Self> {
        if topic != COMMAND_TOPIC {
            return None;
        }
        Self::from_payload(payload)
    }

    /// Parse the payload of a command message
    pub fn from_payload(payload: &str) -> Option<Self> {
        match payload {
            "up" => Some(Command::WipeUp),
            "down" => Some(Command::WipeDown),
            "on" => Some(Command::Enable),
            "off" => Some(Command::Disable),
            _ => None,
        }
    }
}

/// Published event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A sensor's debounced state changed
    Motion { side: Side, detected: bool },
    /// Lights were already on and the hold timer restarted
    HoldRestarted { side: Side, at_ms: u32 },
}

impl Event {
    /// Relative topic of this event
    pub fn topic(&self) -> String<MAX_TOPIC_LEN> {
        let (prefix, side) = match self {
            Event::Motion { side, .. } => ("/motion/", side),
            Event::HoldRestarted { side, .. } => ("/motion_time/", side),
        };
        let mut topic = String::new();
        // Longest topic is "/motion_time/bot", well inside the capacity
        let _ = topic.push_str(prefix);
        let _ = topic.push_str(side.as_str());
        topic
    }

    /// Payload of this event
    pub fn payload(&self) -> String<MAX_PAYLOAD_LEN> {
        let mut payload = String::new();
        match self {
            Event::Motion { detected, .. } => {
                let _ = payload.push_str(if *detected { "on" } else { "off" });
            }
            Event::HoldRestarted { at_ms, .. } => {
                let _ = write!(payload, "{}", at_ms);
            }
        }
        payload
    }

    /// Publish through `publisher` if it is connected
    pub fn publish<P: Publisher>(&self, publisher: &mut P) {
        if !publisher.is_connected() {
            return;
        }
        publisher.publish(&self.topic(), &self.payload());
    }
}
