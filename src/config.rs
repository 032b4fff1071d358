//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_CHANNEL_BUFFER};
use crate::error::{Result, StatsError};

/// Cache tuning parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of ready regions the cache can hold
    pub capacity: usize,
    /// Depth of the feature channel between a source and a fill
    pub channel_buffer: usize,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REGION_CACHE_CAPACITY` - Maximum cached regions (default: 1000)
    /// - `REGION_CACHE_CHANNEL_BUFFER` - Feature channel depth (default: 64)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("REGION_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            channel_buffer: env::var("REGION_CACHE_CHANNEL_BUFFER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CHANNEL_BUFFER),
        }
    }

    /// Configuration with the given capacity and a default channel depth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Validate ==
    /// Rejects degenerate configurations.
    ///
    /// A zero-capacity cache could never hold a result and a zero-depth
    /// channel cannot transport features; both are configuration errors
    /// caught at cache construction, not at query time.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(StatsError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if self.channel_buffer == 0 {
            return Err(StatsError::InvalidConfig(
                "channel buffer must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.channel_buffer, 64);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("REGION_CACHE_CAPACITY");
        env::remove_var("REGION_CACHE_CHANNEL_BUFFER");

        let config = CacheConfig::from_env();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.channel_buffer, 64);
    }

    #[test]
    fn test_config_with_capacity() {
        let config = CacheConfig::with_capacity(3);
        assert_eq!(config.capacity, 3);
        assert_eq!(config.channel_buffer, 64);
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = CacheConfig::with_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(StatsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_channel_buffer() {
        let config = CacheConfig {
            capacity: 10,
            channel_buffer: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(StatsError::InvalidConfig(_))
        ));
    }
}
