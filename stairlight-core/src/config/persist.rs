//! Configuration persistence
//!
//! Loads and saves the staircase settings through a [`SettingsStore`].
//! The record is postcard binary data under [`StorageKey::StaircaseConfig`].

use super::types::StaircaseConfig;
use crate::traits::{SettingsStore, StorageKey, StoreError};

/// Maximum serialized config size (binary)
pub const MAX_CONFIG_SIZE: usize = 128;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Store operation failed
    Store(StoreError),
    /// Serialization failed
    Encode,
    /// Deserialization failed
    Decode,
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        ConfigError::Store(e)
    }
}

/// Load settings from the store
///
/// Returns `Ok(None)` when nothing has been saved yet, so the caller can
/// keep its defaults. Loaded settings are normalized.
pub fn load<S: SettingsStore>(store: &mut S) -> Result<Option<StaircaseConfig>, ConfigError> {
    let mut buffer = [0u8; MAX_CONFIG_SIZE];
    let len = match store.read(StorageKey::StaircaseConfig, &mut buffer) {
        Ok(len) => len,
        Err(StoreError::NotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let config: StaircaseConfig =
        postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Decode)?;
    Ok(Some(config.normalized()))
}

/// Save settings to the store
pub fn save<S: SettingsStore>(store: &mut S, config: &StaircaseConfig) -> Result<(), ConfigError> {
    let mut buffer = [0u8; MAX_CONFIG_SIZE];
    let used = postcard::to_slice(&config.normalized(), &mut buffer)
        .map_err(|_| ConfigError::Encode)?;
    store.write(StorageKey::StaircaseConfig, used)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SensorConfig, MAX_DISTANCE_CM};
    use crate::mock::MockStore;

    #[test]
    fn test_missing_record_keeps_defaults() {
        let mut store = MockStore::new();
        assert_eq!(load(&mut store), Ok(None));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MockStore::new();
        let mut config = StaircaseConfig::default();
        config.enabled = true;
        config.top = SensorConfig::ultrasonic(4, 5, 120);
        config.bottom = SensorConfig::trigger(13);
        config.hold_s = 0;
        config.wipe_off = true;

        save(&mut store, &config).unwrap();
        let loaded = load(&mut store).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_normalizes() {
        let mut store = MockStore::new();
        let mut config = StaircaseConfig::default();
        config.top = SensorConfig::ultrasonic(4, 5, 999);

        save(&mut store, &config).unwrap();
        let loaded = load(&mut store).unwrap().unwrap();
        assert_eq!(loaded.top.max_distance_cm, MAX_DISTANCE_CM);
    }

    #[test]
    fn test_corrupt_record() {
        let mut store = MockStore::new();
        store.write(StorageKey::StaircaseConfig, &[0xFF; 3]).unwrap();
        assert_eq!(load(&mut store), Err(ConfigError::Decode));
    }

    #[test]
    fn test_store_failure_propagates() {
        let mut store = MockStore::new();
        store.fail_with = Some(StoreError::Io);
        assert_eq!(load(&mut store), Err(ConfigError::Store(StoreError::Io)));
        assert_eq!(
            save(&mut store, &StaircaseConfig::default()),
            Err(ConfigError::Store(StoreError::Io))
        );
    }
}
