//! Appender writing encoded events to any `Write` sink

use crate::core::{Appender, EncoderConfig, EncoderError, EncoderMetrics, LogEvent, Result};
use crate::encoder::{Encoder, Schema};
use std::io::Write;
use std::sync::Arc;

/// Owns one encoder and the sink it writes to.
///
/// # Example
///
/// ```
/// use logstash_encoder::appenders::WriterAppender;
/// use logstash_encoder::core::{Appender, EncoderConfig, LogEvent, LogLevel};
/// use logstash_encoder::encoder::Schema;
///
/// let mut appender = WriterAppender::new(Vec::<u8>::new(), Schema::Flat, EncoderConfig::default()).unwrap();
/// appender.append(&LogEvent::new(LogLevel::Info, "started")).unwrap();
/// assert_eq!(appender.metrics().events_encoded(), 1);
/// ```
pub struct WriterAppender<W: Write + Send + 'static> {
    name: String,
    encoder: Box<dyn Encoder<W>>,
    stopped: bool,
}

impl<W: Write + Send + 'static> WriterAppender<W> {
    pub fn new(sink: W, schema: Schema, config: EncoderConfig) -> Result<Self> {
        let mut encoder = schema.build_encoder(config)?;
        encoder.start(sink);
        Ok(Self::with_encoder(format!("writer-{}", schema), encoder))
    }

    /// Wrap an already started encoder
    pub fn with_encoder(name: impl Into<String>, encoder: Box<dyn Encoder<W>>) -> Self {
        Self {
            name: name.into(),
            encoder,
            stopped: false,
        }
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub fn encoder(&self) -> &dyn Encoder<W> {
        self.encoder.as_ref()
    }

    pub fn encoder_mut(&mut self) -> &mut dyn Encoder<W> {
        self.encoder.as_mut()
    }

    pub fn metrics(&self) -> Arc<EncoderMetrics> {
        self.encoder.metrics()
    }

    /// Close the encoder and flush the sink; once closing succeeded later calls are no-ops
    pub fn stop(&mut self) -> Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.encoder.close()?;
        self.stopped = true;
        self.encoder.base_mut().flush()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl<W: Write + Send + 'static> Appender for WriterAppender<W> {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        if self.stopped {
            return Err(EncoderError::Stopped(self.name.clone()));
        }
        self.encoder.do_encode(event)
    }

    fn flush(&mut self) -> Result<()> {
        self.encoder.base_mut().flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Write + Send + 'static> Drop for WriterAppender<W> {
    fn drop(&mut self) {
        // Ensure buffered documents reach the sink
        if self.encoder.base().is_started() {
            let _ = self.encoder.base_mut().flush();
        }
    }
}
