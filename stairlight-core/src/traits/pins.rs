//! Pin ownership arbitration

/// One pin the staircase wants to own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinRequest {
    /// Pin number, None if unassigned
    pub pin: Option<u8>,
    /// Pin will be driven as an output
    pub output: bool,
}

impl PinRequest {
    /// Create a pin request
    pub const fn new(pin: Option<u8>, output: bool) -> Self {
        Self { pin, output }
    }
}

/// Arbiter that grants exclusive use of GPIO pins
pub trait PinArbiter {
    /// Allocate all requested pins or none of them
    ///
    /// Unassigned requests are skipped, so a request list with no assigned
    /// pins succeeds.
    fn allocate(&mut self, requests: &[PinRequest]) -> bool;

    /// Release a pin previously allocated
    fn release(&mut self, pin: u8);
}
