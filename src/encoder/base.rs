//! State and mapping helpers shared by both Logstash schemas

use super::json;
use crate::core::{
    CallerFrame, EncoderConfig, EncoderContext, EncoderError, EncoderMetrics, LogEvent, Result,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

/// Terminator written after every document and once more on close
pub const LINE_SEPARATOR: &[u8] = b"\n";

static DEFAULT_CALLER_DATA: CallerFrame = CallerFrame::empty();

/// First frame of the event's caller data, or an empty placeholder frame
pub fn extract_caller_frame(event: &LogEvent) -> &CallerFrame {
    event.caller_data.first().unwrap_or(&DEFAULT_CALLER_DATA)
}

/// Marker name followed by its directly referenced marker names.
///
/// `None` when the event carries no marker; grandchild markers are not visited.
pub fn create_tags(event: &LogEvent) -> Option<Vec<Value>> {
    let marker = event.marker.as_ref()?;

    let mut tags = vec![Value::from(marker.name())];
    if marker.has_references() {
        tags.extend(marker.references().map(|reference| Value::from(reference.name())));
    }
    Some(tags)
}

/// Set each property as a string field, overwriting fields already present
pub fn add_properties_as_fields(fields: &mut Map<String, Value>, properties: &BTreeMap<String, String>) {
    for (key, value) in properties {
        fields.insert(key.clone(), Value::String(value.clone()));
    }
}

/// Insert the four `caller_*` fields from the event's first caller frame
pub fn add_caller_fields(fields: &mut Map<String, Value>, event: &LogEvent) {
    let caller = extract_caller_frame(event);
    fields.insert("caller_class_name".into(), Value::from(caller.class_name.as_str()));
    fields.insert("caller_method_name".into(), Value::from(caller.method_name.as_str()));
    fields.insert("caller_file_name".into(), Value::from(caller.file_name.as_str()));
    fields.insert("caller_line_number".into(), Value::from(caller.line_number));
}

/// Configuration, property context and sink shared by the schema encoders.
///
/// The sink is supplied by the caller through [`start`](Self::start) and is
/// only ever written to: the encoder never opens it and leaves closing the
/// underlying resource to its owner.
#[derive(Debug)]
pub struct EncoderBase<W> {
    config: EncoderConfig,
    context: Option<EncoderContext>,
    sink: Option<W>,
    metrics: Arc<EncoderMetrics>,
}

impl<W: Write> EncoderBase<W> {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            context: None,
            sink: None,
            metrics: Arc::new(EncoderMetrics::new()),
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EncoderConfig {
        &mut self.config
    }

    pub fn context(&self) -> Option<&EncoderContext> {
        self.context.as_ref()
    }

    pub fn set_context(&mut self, context: EncoderContext) {
        self.context = Some(context);
    }

    pub fn metrics(&self) -> Arc<EncoderMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Attach the output sink, replacing any previous one
    pub fn start(&mut self, sink: W) {
        tracing::debug!(replaced = self.sink.is_some(), "encoder sink attached");
        self.sink = Some(sink);
    }

    pub fn is_started(&self) -> bool {
        self.sink.is_some()
    }

    pub fn sink(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> Option<&mut W> {
        self.sink.as_mut()
    }

    /// Detach and return the sink
    pub fn take_sink(&mut self) -> Option<W> {
        self.sink.take()
    }

    pub fn format_timestamp(&self, timestamp_millis: i64) -> String {
        self.config.time_zone.format_millis(timestamp_millis)
    }

    /// Serialize `document`, write it and one terminator, then flush if configured.
    ///
    /// The event is counted as encoded only once the write, and the flush when
    /// one is due, succeeded; a failed flush counts as a single failure.
    pub fn write_document(&mut self, document: &Value) -> Result<()> {
        let bytes = json::to_ascii_vec(document)?;
        let immediate_flush = self.config.immediate_flush;
        let sink = self.sink.as_mut().ok_or(EncoderError::NotStarted)?;

        let written = sink
            .write_all(&bytes)
            .and_then(|()| sink.write_all(LINE_SEPARATOR))
            .map_err(|e| EncoderError::io_operation("writing event document", e));
        if let Err(err) = written {
            self.metrics.record_write_failure();
            tracing::warn!(error = %err, "failed to write encoded event");
            return Err(err);
        }
        self.metrics.record_bytes(bytes.len() + LINE_SEPARATOR.len());

        if immediate_flush {
            self.flush()?;
        }
        self.metrics.record_event();
        Ok(())
    }

    /// Flush the sink
    pub fn flush(&mut self) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(EncoderError::NotStarted)?;
        if let Err(e) = sink.flush() {
            self.metrics.record_write_failure();
            tracing::warn!(error = %e, "failed to flush encoder sink");
            return Err(EncoderError::io_operation("flushing sink", e));
        }
        self.metrics.record_flush();
        Ok(())
    }

    /// Write one trailing terminator; the sink is not flushed
    pub fn close(&mut self) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(EncoderError::NotStarted)?;
        sink.write_all(LINE_SEPARATOR)
            .map_err(|e| EncoderError::io_operation("writing closing terminator", e))?;
        self.metrics.record_bytes(LINE_SEPARATOR.len());
        tracing::debug!("encoder closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Marker};
    use std::io;

    fn event() -> LogEvent {
        LogEvent::new(LogLevel::Info, "msg").with_mdc(BTreeMap::new())
    }

    #[test]
    fn test_extract_caller_frame_first() {
        let event = event().with_caller_data(vec![
            CallerFrame::new("app::a", "first", "a.rs", 1),
            CallerFrame::new("app::b", "second", "b.rs", 2),
        ]);
        assert_eq!(extract_caller_frame(&event).method_name, "first");
    }

    #[test]
    fn test_extract_caller_frame_default() {
        let event = event();
        let frame = extract_caller_frame(&event);
        assert_eq!(frame, &CallerFrame::empty());
    }

    #[test]
    fn test_create_tags() {
        assert!(create_tags(&event()).is_none());

        let marker = Marker::new("M1")
            .with_reference(Marker::new("M2").with_reference(Marker::new("grandchild")))
            .with_reference(Marker::new("M3"));
        let tags = create_tags(&event().with_marker(marker)).unwrap();
        assert_eq!(tags, vec![Value::from("M1"), Value::from("M2"), Value::from("M3")]);

        let tags = create_tags(&event().with_marker(Marker::new("solo"))).unwrap();
        assert_eq!(tags, vec![Value::from("solo")]);
    }

    #[test]
    fn test_add_properties_overwrites() {
        let mut fields = Map::new();
        fields.insert("env".into(), Value::from("staging"));
        fields.insert("other".into(), Value::from(1));

        let mut properties = BTreeMap::new();
        properties.insert("env".to_string(), "prod".to_string());
        properties.insert("zone".to_string(), "a".to_string());
        add_properties_as_fields(&mut fields, &properties);

        assert_eq!(fields["env"], "prod");
        assert_eq!(fields["zone"], "a");
        // overwritten keys keep their original position
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["env", "other", "zone"]);
    }

    #[test]
    fn test_write_requires_sink() {
        let mut base: EncoderBase<Vec<u8>> = EncoderBase::new(EncoderConfig::default());
        let err = base.write_document(&Value::Null).unwrap_err();
        assert!(matches!(err, EncoderError::NotStarted));
        assert!(matches!(base.close(), Err(EncoderError::NotStarted)));
    }

    #[test]
    fn test_write_pair_and_flush() {
        let mut base = EncoderBase::new(EncoderConfig::default());
        base.start(Vec::<u8>::new());
        base.write_document(&serde_json::json!({"a": 1})).unwrap();
        base.close().unwrap();

        assert_eq!(base.sink().unwrap(), b"{\"a\":1}\n\n");
        let metrics = base.metrics();
        assert_eq!(metrics.events_encoded(), 1);
        assert_eq!(metrics.flushes(), 1);
        assert_eq!(metrics.bytes_written(), 9);
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct UnflushableSink(Vec<u8>);

    impl Write for UnflushableSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "device full"))
        }
    }

    #[test]
    fn test_flush_failure_counted_once() {
        let mut base = EncoderBase::new(EncoderConfig::default());
        base.start(UnflushableSink(Vec::new()));

        let err = base.write_document(&serde_json::json!({"a": 1})).unwrap_err();
        assert!(err.is_io());
        assert_eq!(base.sink().unwrap().0, b"{\"a\":1}\n");

        let metrics = base.metrics();
        assert_eq!(metrics.events_encoded(), 0);
        assert_eq!(metrics.write_failures(), 1);
        assert_eq!(metrics.bytes_written(), 8);
        assert_eq!(metrics.flushes(), 0);
        assert!((metrics.failure_rate() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut base = EncoderBase::new(EncoderConfig::default());
        base.start(BrokenSink);

        let err = base.write_document(&Value::Null).unwrap_err();
        assert!(err.is_io());
        let metrics = base.metrics();
        assert_eq!(metrics.write_failures(), 1);
        assert_eq!(metrics.events_encoded(), 0);
        assert_eq!(metrics.flushes(), 0);
    }
}
