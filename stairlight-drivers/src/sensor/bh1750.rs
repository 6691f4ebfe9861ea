//! BH1750 ambient light sensor
//!
//! Used for daylight suppression. Runs in continuous high-resolution mode
//! (1 lx resolution, ~120 ms per conversion); a reading is two big-endian
//! bytes divided by 1.2.

use embedded_hal::i2c::I2c;
use stairlight_core::traits::AmbientLight;

/// Address with ADDR pulled low
pub const ADDRESS_LOW: u8 = 0x23;

/// Address with ADDR pulled high
pub const ADDRESS_HIGH: u8 = 0x5C;

/// Counts per lux in high-resolution mode
const COUNTS_PER_LUX: f32 = 1.2;

#[allow(dead_code)]
mod cmd {
    pub const POWER_DOWN: u8 = 0x00;
    pub const POWER_ON: u8 = 0x01;
    pub const RESET: u8 = 0x07;
    pub const CONTINUOUS_HIGH_RES: u8 = 0x10;
}

/// BH1750 driver
pub struct Bh1750<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Bh1750<I2C> {
    /// Create a driver for the sensor at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Power the sensor up and start continuous conversions
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[cmd::POWER_ON])?;
        self.i2c.write(self.address, &[cmd::CONTINUOUS_HIGH_RES])
    }

    /// Read the latest conversion
    pub fn read_lux(&mut self) -> Result<f32, I2C::Error> {
        let mut raw = [0u8; 2];
        self.i2c.read(self.address, &mut raw)?;
        Ok(f32::from(u16::from_be_bytes(raw)) / COUNTS_PER_LUX)
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> AmbientLight for Bh1750<I2C> {
    fn illuminance(&mut self) -> Option<f32> {
        match self.read_lux() {
            Ok(lux) => Some(lux),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("BH1750 read failed");
                None
            }
        }
    }
}
