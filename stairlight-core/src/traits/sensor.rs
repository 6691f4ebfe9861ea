//! Sensor access traits

/// Electrical mode of a sensor pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input with pull-down (PIR trigger lines)
    InputPullDown,
    /// Floating input (ultrasonic echo)
    Input,
    /// Push-pull output (ultrasonic trigger)
    Output,
}

/// GPIO access by pin number
///
/// Pin numbers come from configuration, so the sensors are addressed the
/// same way the pin arbiter hands them out.
pub trait SensorIo {
    /// Put a pin into the given mode
    fn configure(&mut self, pin: u8, mode: PinMode);

    /// Read the level of an input pin
    fn read_level(&mut self, pin: u8) -> bool;

    /// Send an ultrasonic trigger pulse and report whether an echo pulse
    /// completed within `timeout_us`
    ///
    /// Must never block longer than the timeout plus the trigger pulse.
    fn ping(&mut self, trigger: u8, echo: u8, timeout_us: u32) -> bool;
}

/// Ambient light sensor
pub trait AmbientLight {
    /// Current illuminance in lux, or None if the sensor did not answer
    fn illuminance(&mut self) -> Option<f32>;
}

/// Placeholder for setups without an ambient light sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAmbientLight;

impl AmbientLight for NoAmbientLight {
    fn illuminance(&mut self) -> Option<f32> {
        None
    }
}
