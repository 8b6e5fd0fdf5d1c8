//! Console appender implementation

use super::writer::WriterAppender;
use crate::core::{EncoderConfig, Result};
use crate::encoder::Schema;
use std::io::Stdout;

/// Writes newline-delimited JSON to standard output
pub type ConsoleAppender = WriterAppender<Stdout>;

impl WriterAppender<Stdout> {
    /// # Example
    ///
    /// ```
    /// use logstash_encoder::appenders::ConsoleAppender;
    /// use logstash_encoder::core::EncoderConfig;
    /// use logstash_encoder::encoder::Schema;
    ///
    /// let appender = ConsoleAppender::stdout(Schema::Flat, EncoderConfig::default()).unwrap();
    /// ```
    pub fn stdout(schema: Schema, config: EncoderConfig) -> Result<Self> {
        let mut appender = WriterAppender::new(std::io::stdout(), schema, config)?;
        appender.rename(format!("console-{}", schema));
        Ok(appender)
    }
}
