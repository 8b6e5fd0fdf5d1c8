//! Appender implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod locked;
pub mod writer;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;
#[cfg(feature = "file")]
pub use file::FileAppender;
pub use locked::LockedAppender;
pub use writer::WriterAppender;

pub use crate::core::Appender;
