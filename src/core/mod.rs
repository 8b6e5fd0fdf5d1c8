//! Core event types and shared encoder infrastructure

pub mod appender;
pub mod config;
pub mod context;
pub mod error;
pub mod log_event;
pub mod log_level;
pub mod metrics;
pub mod throwable;
pub mod timestamp;

pub use appender::Appender;
pub use config::EncoderConfig;
pub use context::{mdc, EncoderContext, MdcGuard};
pub use error::{EncoderError, Result};
pub use log_event::{CallerFrame, LogEvent, Marker, NATIVE_METHOD_LINE};
pub use log_level::LogLevel;
pub use metrics::EncoderMetrics;
pub use throwable::ThrowableProxy;
pub use timestamp::{EventTimeZone, ISO_DATETIME_TIME_ZONE_FORMAT_WITH_MILLIS};
