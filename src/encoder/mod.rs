//! Logstash JSON encoders
//!
//! Two schemas are supported:
//! - [`LogstashEncoder`]: `@timestamp`, `@message`, nested `@fields` and `@tags`
//! - [`LogstashEncoderV1`]: the legacy flat layout with every field at the root

pub mod base;
pub mod json;
pub mod logstash;
pub mod logstash_v1;

pub use base::{EncoderBase, LINE_SEPARATOR};
pub use logstash::LogstashEncoder;
pub use logstash_v1::LogstashEncoderV1;

use crate::core::{EncoderConfig, EncoderContext, EncoderMetrics, LogEvent, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

/// Turns log events into newline-delimited JSON written to a sink.
///
/// Implementors supply the schema through [`build_document`](Self::build_document);
/// the write protocol and configuration live in the shared [`EncoderBase`].
///
/// # Example
///
/// ```
/// use logstash_encoder::core::{EncoderConfig, EventTimeZone, LogEvent, LogLevel};
/// use logstash_encoder::encoder::{Encoder, LogstashEncoder};
///
/// let config = EncoderConfig::new().with_time_zone(EventTimeZone::Utc);
/// let mut encoder = LogstashEncoder::new(config);
/// encoder.start(Vec::<u8>::new());
///
/// let event = LogEvent::new(LogLevel::Info, "hello").with_logger_name("app");
/// encoder.do_encode(&event).unwrap();
///
/// let out = encoder.base().sink().unwrap();
/// assert!(out.ends_with(b"\n"));
/// ```
pub trait Encoder<W: Write + Send>: Send {
    fn base(&self) -> &EncoderBase<W>;

    fn base_mut(&mut self) -> &mut EncoderBase<W>;

    /// Build the JSON document for one event
    fn build_document(&self, event: &LogEvent) -> Value;

    fn name(&self) -> &str;

    /// Attach the sink every subsequent event is written to
    fn start(&mut self, sink: W) {
        self.base_mut().start(sink);
    }

    /// Encode one event: one document, one terminator, at most one flush
    fn do_encode(&mut self, event: &LogEvent) -> Result<()> {
        let document = self.build_document(event);
        self.base_mut().write_document(&document)
    }

    /// Append the trailing terminator to the sink
    fn close(&mut self) -> Result<()> {
        self.base_mut().close()
    }

    fn is_immediate_flush(&self) -> bool {
        self.base().config().immediate_flush
    }

    fn set_immediate_flush(&mut self, immediate_flush: bool) {
        self.base_mut().config_mut().immediate_flush = immediate_flush;
    }

    fn is_include_caller_info(&self) -> bool {
        self.base().config().include_caller_info
    }

    fn set_include_caller_info(&mut self, include_caller_info: bool) {
        self.base_mut().config_mut().include_caller_info = include_caller_info;
    }

    fn set_context(&mut self, context: EncoderContext) {
        self.base_mut().set_context(context);
    }

    fn metrics(&self) -> Arc<EncoderMetrics> {
        self.base().metrics()
    }
}

/// Document layout produced by an encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// `@fields`/`@tags` layout with context properties
    #[default]
    Nested,
    /// Legacy flat layout without context properties
    Flat,
}

impl Schema {
    /// Validate `config` and build the matching encoder
    pub fn build_encoder<W>(self, config: EncoderConfig) -> Result<Box<dyn Encoder<W>>>
    where
        W: Write + Send + 'static,
    {
        config.validate()?;
        Ok(match self {
            Schema::Nested => Box::new(LogstashEncoder::new(config)),
            Schema::Flat => Box::new(LogstashEncoderV1::new(config)),
        })
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Schema::Nested => "nested",
            Schema::Flat => "flat",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nested" | "logstash" => Ok(Schema::Nested),
            "flat" | "v1" | "logstash_v1" => Ok(Schema::Flat),
            _ => Err(format!("Invalid schema: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EncoderError, EventTimeZone};

    #[test]
    fn test_schema_parse() {
        assert_eq!("nested".parse::<Schema>(), Ok(Schema::Nested));
        assert_eq!("V1".parse::<Schema>(), Ok(Schema::Flat));
        assert!("xml".parse::<Schema>().is_err());
        assert_eq!(Schema::Flat.to_string(), "flat");
    }

    #[test]
    fn test_build_encoder() {
        let encoder = Schema::Flat.build_encoder::<Vec<u8>>(EncoderConfig::default()).unwrap();
        assert_eq!(encoder.name(), "logstash_v1");

        let encoder = Schema::Nested.build_encoder::<Vec<u8>>(EncoderConfig::default()).unwrap();
        assert_eq!(encoder.name(), "logstash");
    }

    #[test]
    fn test_build_encoder_validates() {
        let config = EncoderConfig::new().with_time_zone(EventTimeZone::FixedOffset { seconds: 100_000 });
        let result = Schema::Nested.build_encoder::<Vec<u8>>(config);
        assert!(matches!(result, Err(EncoderError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_config_accessors() {
        let mut encoder = LogstashEncoder::<Vec<u8>>::new(EncoderConfig::default());
        assert!(encoder.is_immediate_flush());
        assert!(encoder.is_include_caller_info());

        encoder.set_immediate_flush(false);
        encoder.set_include_caller_info(false);
        assert!(!encoder.is_immediate_flush());
        assert!(!encoder.is_include_caller_info());
    }
}
