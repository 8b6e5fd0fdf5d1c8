//! Legacy flat-schema encoder

use super::base::{add_caller_fields, create_tags, EncoderBase};
use super::Encoder;
use crate::core::{EncoderConfig, LogEvent};
use serde_json::{Map, Value};
use std::io::Write;

/// Encoder for the legacy flat document layout.
///
/// Every field sits at the document root and `tags` is always present,
/// `null` when the event has no marker. Encoder-context and diagnostic-context
/// properties are never emitted.
#[derive(Debug)]
pub struct LogstashEncoderV1<W> {
    base: EncoderBase<W>,
}

impl<W: Write> LogstashEncoderV1<W> {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            base: EncoderBase::new(config),
        }
    }
}

impl<W: Write> Default for LogstashEncoderV1<W> {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl<W: Write + Send> Encoder<W> for LogstashEncoderV1<W> {
    fn base(&self) -> &EncoderBase<W> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EncoderBase<W> {
        &mut self.base
    }

    fn build_document(&self, event: &LogEvent) -> Value {
        let mut root = Map::new();
        root.insert(
            "@timestamp".into(),
            Value::from(self.base.format_timestamp(event.timestamp_millis)),
        );
        root.insert("message".into(), Value::from(event.message.as_str()));
        root.insert(
            "tags".into(),
            create_tags(event).map_or(Value::Null, Value::Array),
        );
        root.insert("thread_name".into(), Value::from(event.thread_name.as_str()));
        root.insert("logger_name".into(), Value::from(event.logger_name.as_str()));
        root.insert("level".into(), Value::from(event.level.to_str()));
        root.insert("level_value".into(), Value::from(event.level.value()));

        if self.base.config().include_caller_info {
            add_caller_fields(&mut root, event);
        }

        if let Some(throwable) = &event.throwable {
            root.insert("stack_trace".into(), Value::from(throwable.render()));
        }

        Value::Object(root)
    }

    fn name(&self) -> &str {
        "logstash_v1"
    }
}
