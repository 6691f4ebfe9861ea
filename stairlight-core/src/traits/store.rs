//! Settings storage abstraction
//!
//! Key-value storage for persisted settings. The host decides where the
//! bytes live (flash, file, EEPROM).

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Staircase module settings (postcard)
    StaircaseConfig = 0,
}

/// Errors from settings storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying medium failed
    Io,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Storage is full
    Full,
}

/// Settings store
pub trait SettingsStore {
    /// Read a value by key into `buffer`, returning the number of bytes read
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StoreError>;

    /// Write a value by key
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StoreError>;
}
