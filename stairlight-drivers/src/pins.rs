//! Pin ownership for config-driven pin assignment
//!
//! Modules ask for their pins by number at setup. The registry grants a
//! request only if every pin in it is free, so a module never ends up
//! holding half of its pins.

use stairlight_core::traits::{PinArbiter, PinRequest};

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for special function
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Free,
    Reserved,
    Taken,
}

/// Registry of `N` GPIO pins
pub struct PinRegistry<const N: usize> {
    slots: [Slot; N],
}

impl<const N: usize> Default for PinRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PinRegistry<N> {
    /// Create a registry with every pin free
    pub const fn new() -> Self {
        Self {
            slots: [Slot::Free; N],
        }
    }

    /// Mark a pin as unavailable (flash, USB, LED data line)
    pub fn reserve(&mut self, pin: u8) -> Result<(), PinError> {
        self.check(pin)?;
        self.slots[pin as usize] = Slot::Reserved;
        Ok(())
    }

    /// Check if a pin can be taken
    pub fn check(&self, pin: u8) -> Result<(), PinError> {
        match self.slots.get(pin as usize) {
            None => Err(PinError::InvalidPin),
            Some(Slot::Free) => Ok(()),
            Some(Slot::Reserved) => Err(PinError::Reserved),
            Some(Slot::Taken) => Err(PinError::AlreadyTaken),
        }
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin: u8) -> bool {
        self.check(pin).is_ok()
    }

    /// Take every pin in `requests`, or none of them
    pub fn take_all(&mut self, requests: &[PinRequest]) -> Result<(), PinError> {
        for (i, request) in requests.iter().enumerate() {
            let Some(pin) = request.pin else { continue };
            self.check(pin)?;
            // The same pin twice in one request
            if requests[..i].iter().any(|r| r.pin == Some(pin)) {
                return Err(PinError::AlreadyTaken);
            }
        }

        for request in requests {
            if let Some(pin) = request.pin {
                self.slots[pin as usize] = Slot::Taken;
            }
        }
        Ok(())
    }
}

impl<const N: usize> PinArbiter for PinRegistry<N> {
    fn allocate(&mut self, requests: &[PinRequest]) -> bool {
        match self.take_all(requests) {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Pin request refused: {}", _e);
                false
            }
        }
    }

    fn release(&mut self, pin: u8) {
        if let Some(slot) = self.slots.get_mut(pin as usize) {
            if *slot == Slot::Taken {
                *slot = Slot::Free;
            }
        }
    }
}
