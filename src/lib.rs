//! # Logstash Encoder
//!
//! Encodes structured log events as single-line JSON documents for log
//! shipping and indexing pipelines.
//!
//! ## Features
//!
//! - **Two Schemas**: nested `@fields`/`@tags` layout and the legacy flat layout
//! - **Context Properties**: encoder-context and per-thread diagnostic properties
//!   merged into the nested schema
//! - **Caller Data**: optional caller class, method, file and line
//! - **Stack Traces**: full cause chains rendered as text
//! - **ASCII-Safe Output**: non-ASCII characters escaped as `\uXXXX`

pub mod appenders;
pub mod core;
pub mod encoder;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{LockedAppender, WriterAppender};
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::core::{
        mdc, Appender, CallerFrame, EncoderConfig, EncoderContext, EncoderError, EncoderMetrics,
        EventTimeZone, LogEvent, LogLevel, Marker, MdcGuard, Result, ThrowableProxy,
    };
    pub use crate::encoder::{Encoder, LogstashEncoder, LogstashEncoderV1, Schema};
}

pub use appenders::{LockedAppender, WriterAppender};
pub use core::{
    mdc, Appender, CallerFrame, EncoderConfig, EncoderContext, EncoderError, EncoderMetrics,
    EventTimeZone, LogEvent, LogLevel, Marker, MdcGuard, Result, ThrowableProxy,
};
pub use encoder::{Encoder, LogstashEncoder, LogstashEncoderV1, Schema};
