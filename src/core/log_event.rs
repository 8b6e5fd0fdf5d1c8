//! Log event structure

use super::context::mdc;
use super::log_level::LogLevel;
use super::throwable::ThrowableProxy;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

// Thread names are looked up once per thread
thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached thread name, computing and caching it on first access
///
/// Unnamed threads fall back to their debug id, e.g. `ThreadId(7)`.
fn get_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                current
                    .name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{:?}", current.id()))
            })
            .clone()
    })
}

/// Line number Java-style traces use for native frames
pub const NATIVE_METHOD_LINE: i32 = -2;

/// Source location of the code that issued a log statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallerFrame {
    pub class_name: String,
    pub method_name: String,
    pub file_name: String,
    pub line_number: i32,
}

impl CallerFrame {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        file_name: impl Into<String>,
        line_number: i32,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            file_name: file_name.into(),
            line_number,
        }
    }

    /// Placeholder frame used when no caller data is available
    pub const fn empty() -> Self {
        Self {
            class_name: String::new(),
            method_name: String::new(),
            file_name: String::new(),
            line_number: 0,
        }
    }
}

impl fmt::Display for CallerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.class_name.is_empty(), self.method_name.is_empty()) {
            (false, false) => write!(f, "{}::{}", self.class_name, self.method_name)?,
            (false, true) => f.write_str(&self.class_name)?,
            (true, _) => f.write_str(&self.method_name)?,
        }

        if self.line_number == NATIVE_METHOD_LINE {
            f.write_str("(Native Method)")
        } else if self.file_name.is_empty() {
            f.write_str("(Unknown Source)")
        } else if self.line_number >= 0 {
            write!(f, "({}:{})", self.file_name, self.line_number)
        } else {
            write!(f, "({})", self.file_name)
        }
    }
}

/// Named tag attached to an event, referencing other markers one level deep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    name: String,
    references: Vec<Marker>,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            references: Vec::new(),
        }
    }

    pub fn with_reference(mut self, reference: Marker) -> Self {
        self.add(reference);
        self
    }

    /// Attach a referenced marker.
    ///
    /// Ignored when this marker already reaches a marker of that name at any
    /// depth, or when the reference itself reaches this marker's name.
    pub fn add(&mut self, reference: Marker) {
        if self.contains(&reference.name) || reference.contains(&self.name) {
            return;
        }
        self.references.push(reference);
    }

    /// True when this marker or any marker it references, at any depth, has `name`
    pub fn contains(&self, name: &str) -> bool {
        self.name == name || self.references.iter().any(|m| m.contains(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_references(&self) -> bool {
        !self.references.is_empty()
    }

    pub fn references(&self) -> impl Iterator<Item = &Marker> {
        self.references.iter()
    }
}

/// A single log statement, as handed to an encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub level: LogLevel,
    /// Fully formatted message text
    pub message: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_millis: i64,
    pub logger_name: String,
    pub thread_name: String,
    #[serde(default)]
    pub caller_data: Vec<CallerFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throwable: Option<ThrowableProxy>,
    /// Diagnostic context captured when the event was created
    #[serde(default)]
    pub mdc: BTreeMap<String, String>,
}

impl LogEvent {
    /// Create an event stamped with the current time, thread and diagnostic context
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp_millis: chrono::Utc::now().timestamp_millis(),
            logger_name: String::new(),
            thread_name: get_thread_name(),
            caller_data: Vec::new(),
            marker: None,
            throwable: None,
            mdc: mdc::copy_of_context_map(),
        }
    }

    pub fn with_logger_name(mut self, logger_name: impl Into<String>) -> Self {
        self.logger_name = logger_name.into();
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn with_timestamp_millis(mut self, timestamp_millis: i64) -> Self {
        self.timestamp_millis = timestamp_millis;
        self
    }

    pub fn with_caller_data(mut self, caller_data: Vec<CallerFrame>) -> Self {
        self.caller_data = caller_data;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_throwable(mut self, throwable: ThrowableProxy) -> Self {
        self.throwable = Some(throwable);
        self
    }

    /// Replace the captured diagnostic context
    pub fn with_mdc(mut self, mdc: BTreeMap<String, String>) -> Self {
        self.mdc = mdc;
        self
    }

    pub fn with_mdc_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mdc.insert(key.into(), value.into());
        self
    }
}
