//! Encoder configuration

use super::error::{EncoderError, Result};
use super::timestamp::EventTimeZone;
use serde::{Deserialize, Serialize};

/// Per-encoder switches, set before the encoder is used.
///
/// Deserializes from configuration files with missing keys taking their
/// defaults; the camelCase spellings `immediateFlush`, `includeCallerInfo`
/// and `timeZone` are accepted as well.
///
/// # Examples
///
/// ```
/// use logstash_encoder::core::{EncoderConfig, EventTimeZone};
///
/// let config = EncoderConfig::new()
///     .with_immediate_flush(false)
///     .with_time_zone(EventTimeZone::Utc);
///
/// assert!(!config.immediate_flush);
/// assert!(config.include_caller_info);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Flush the sink after every event
    #[serde(alias = "immediateFlush")]
    pub immediate_flush: bool,
    /// Emit the four `caller_*` fields.
    ///
    /// Capturing caller data is the most expensive part of building an event.
    #[serde(alias = "includeCallerInfo")]
    pub include_caller_info: bool,
    /// Time zone `@timestamp` is rendered in
    #[serde(alias = "timeZone")]
    pub time_zone: EventTimeZone,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            immediate_flush: true,
            include_caller_info: true,
            time_zone: EventTimeZone::default(),
        }
    }
}

impl EncoderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_immediate_flush(mut self, immediate_flush: bool) -> Self {
        self.immediate_flush = immediate_flush;
        self
    }

    #[must_use]
    pub fn with_include_caller_info(mut self, include_caller_info: bool) -> Self {
        self.include_caller_info = include_caller_info;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: EventTimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Reject settings the encoder cannot honour
    pub fn validate(&self) -> Result<()> {
        if !self.time_zone.is_valid() {
            return Err(EncoderError::config(
                "EncoderConfig",
                format!("time zone {:?} is not within one day of UTC", self.time_zone),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert!(config.immediate_flush);
        assert!(config.include_caller_info);
        assert_eq!(config.time_zone, EventTimeZone::Local);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EncoderConfig::new()
            .with_immediate_flush(false)
            .with_include_caller_info(false)
            .with_time_zone(EventTimeZone::hours_east(2));

        assert!(!config.immediate_flush);
        assert!(!config.include_caller_info);
        assert_eq!(config.time_zone, EventTimeZone::FixedOffset { seconds: 7200 });
    }

    #[test]
    fn test_partial_deserialization() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"include_caller_info":false}"#).expect("deserialize");
        assert!(config.immediate_flush);
        assert!(!config.include_caller_info);
    }

    #[test]
    fn test_camel_case_aliases() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"immediateFlush":false,"timeZone":"utc"}"#).expect("deserialize");
        assert!(!config.immediate_flush);
        assert_eq!(config.time_zone, EventTimeZone::Utc);
    }

    #[test]
    fn test_invalid_offset_rejected() {
        let config = EncoderConfig::new().with_time_zone(EventTimeZone::FixedOffset { seconds: -86_400 });
        assert!(matches!(
            config.validate(),
            Err(EncoderError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_minimum_offset_rejected_without_panic() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"time_zone":{"fixed_offset":{"seconds":-2147483648}}}"#)
                .expect("deserialize");
        assert_eq!(config.time_zone, EventTimeZone::FixedOffset { seconds: i32::MIN });
        assert!(matches!(
            config.validate(),
            Err(EncoderError::InvalidConfiguration { .. })
        ));
    }
}
