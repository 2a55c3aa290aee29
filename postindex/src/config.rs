//! Configuration for a [`RecordIndex`](crate::RecordIndex).
//!
//! An [`IndexConfig`] fixes the timestamp key format and the initial capacity
//! of the internal structures. It can be built in code or loaded from a JSON
//! file; missing fields take their defaults.
//!
//! ```json
//! { "timestamp_format": "%d/%m/%Y %H:%M", "initial_capacity": 64 }
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::timestamp::{self, DEFAULT_FORMAT, TimestampParser};

/// Settings for a record index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// `strftime`-style format for timestamp keys.
    pub timestamp_format: String,
    /// Number of posts to reserve space for up front.
    pub initial_capacity: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_FORMAT.to_string(),
            initial_capacity: 0,
        }
    }
}

impl IndexConfig {
    /// Loads a config from a JSON file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] if the file
    /// cannot be read or decoded, and [`ConfigError::InvalidFormat`] if the
    /// timestamp format fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            format = %config.timestamp_format,
            "loaded index config"
        );
        Ok(config)
    }

    /// Checks that the timestamp format can key posts at minute precision.
    ///
    /// A reference timestamp is rendered with the format and parsed back; the
    /// format is accepted only if the result is identical.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFormat`] if the format is empty, contains
    /// an unknown specifier, or does not round-trip.
    pub fn validate(&self) -> Result<()> {
        let format = &self.timestamp_format;
        let invalid = |reason: &str| ConfigError::InvalidFormat {
            format: format.clone(),
            reason: reason.to_string(),
        };

        if format.trim().is_empty() {
            return Err(invalid("format is empty").into());
        }
        if timestamp::has_invalid_specifier(format) {
            return Err(invalid("unknown format specifier").into());
        }

        let Some(reference) =
            NaiveDate::from_ymd_opt(2024, 1, 17).and_then(|d| d.and_hms_opt(15, 7, 0))
        else {
            return Err(invalid("reference timestamp unavailable").into());
        };
        let parser = TimestampParser::new(format.clone());
        match parser.parse(&parser.format(&reference)) {
            Ok(parsed) if parsed == reference => Ok(()),
            Ok(_) => Err(invalid("format loses date or minute precision").into()),
            Err(_) => Err(invalid("format does not identify a date and time").into()),
        }
    }

    /// Returns a parser for this config's timestamp format.
    pub fn parser(&self) -> TimestampParser {
        TimestampParser::new(self.timestamp_format.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;

    #[test]
    fn test_default_config_is_valid() {
        let config = IndexConfig::default();
        assert_eq!(config.timestamp_format, DEFAULT_FORMAT);
        assert_eq!(config.initial_capacity, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_iso_format_is_valid() {
        let config = IndexConfig {
            timestamp_format: "%Y-%m-%dT%H:%M".to_string(),
            ..IndexConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_format_rejected() {
        let config = IndexConfig {
            timestamp_format: "  ".to_string(),
            ..IndexConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(IndexError::Config(ConfigError::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn test_date_only_format_rejected() {
        let config = IndexConfig {
            timestamp_format: "%d/%m/%Y".to_string(),
            ..IndexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hour_only_format_rejected() {
        let config = IndexConfig {
            timestamp_format: "%d/%m/%Y %H".to_string(),
            ..IndexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_specifier_rejected() {
        let config = IndexConfig {
            timestamp_format: "%d/%m/%Y %Q".to_string(),
            ..IndexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: IndexConfig = serde_json::from_str(r#"{"initial_capacity": 16}"#).unwrap();
        assert_eq!(config.timestamp_format, DEFAULT_FORMAT);
        assert_eq!(config.initial_capacity, 16);
    }
}
