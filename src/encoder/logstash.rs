//! Nested-schema encoder: `@timestamp`, `@message`, `@fields`, `@tags`

use super::base::{add_caller_fields, add_properties_as_fields, create_tags, EncoderBase};
use super::Encoder;
use crate::core::{EncoderConfig, LogEvent};
use serde_json::{Map, Value};
use std::io::Write;

/// Encoder for the `@fields`/`@tags` document layout.
///
/// Logger, thread, level, caller and stack-trace data are nested under
/// `@fields` together with the encoder-context and diagnostic-context
/// properties. `@tags` is omitted when the event has no marker.
///
/// ```text
/// {"@timestamp":"...","@message":"...","@fields":{"logger_name":"...",...},"@tags":["..."]}
/// ```
#[derive(Debug)]
pub struct LogstashEncoder<W> {
    base: EncoderBase<W>,
}

impl<W: Write> LogstashEncoder<W> {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            base: EncoderBase::new(config),
        }
    }

    fn create_fields(&self, event: &LogEvent) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("logger_name".into(), Value::from(event.logger_name.as_str()));
        fields.insert("thread_name".into(), Value::from(event.thread_name.as_str()));
        fields.insert("level".into(), Value::from(event.level.to_str()));
        fields.insert("level_value".into(), Value::from(event.level.value()));

        if self.base.config().include_caller_info {
            add_caller_fields(&mut fields, event);
        }

        if let Some(throwable) = &event.throwable {
            fields.insert("stack_trace".into(), Value::from(throwable.render()));
        }

        // diagnostic context is merged last so it wins on key collisions
        if let Some(context) = self.base.context() {
            add_properties_as_fields(&mut fields, &context.copy_of_property_map());
        }
        add_properties_as_fields(&mut fields, &event.mdc);

        fields
    }
}

impl<W: Write> Default for LogstashEncoder<W> {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl<W: Write + Send> Encoder<W> for LogstashEncoder<W> {
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
        root.insert("@message".into(), Value::from(event.message.as_str()));
        root.insert("@fields".into(), Value::Object(self.create_fields(event)));
        if let Some(tags) = create_tags(event) {
            root.insert("@tags".into(), Value::Array(tags));
        }
        Value::Object(root)
    }

    fn name(&self) -> &str {
        "logstash"
    }
}
