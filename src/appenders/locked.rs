//! Appender wrapper for concurrent callers

use crate::core::{Appender, LogEvent, Result};
use parking_lot::Mutex;

/// Serialises `append` calls from many threads onto one appender.
///
/// Each event's document and terminator are written while the lock is held,
/// so lines from concurrent callers never interleave.
///
/// # Example
///
/// ```
/// use logstash_encoder::appenders::{LockedAppender, WriterAppender};
/// use logstash_encoder::core::{EncoderConfig, LogEvent, LogLevel};
/// use logstash_encoder::encoder::Schema;
/// use std::sync::Arc;
///
/// let inner = WriterAppender::new(Vec::<u8>::new(), Schema::Nested, EncoderConfig::default()).unwrap();
/// let shared = Arc::new(LockedAppender::new(inner));
///
/// let worker = Arc::clone(&shared);
/// std::thread::spawn(move || worker.append(&LogEvent::new(LogLevel::Info, "from worker")))
///     .join()
///     .unwrap()
///     .unwrap();
/// ```
pub struct LockedAppender<A> {
    inner: Mutex<A>,
}

impl<A: Appender> LockedAppender<A> {
    pub fn new(appender: A) -> Self {
        Self {
            inner: Mutex::new(appender),
        }
    }

    pub fn append(&self, event: &LogEvent) -> Result<()> {
        self.inner.lock().append(event)
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    pub fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }

    /// Run `f` with exclusive access to the wrapped appender
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    pub fn into_inner(self) -> A {
        self.inner.into_inner()
    }
}
