//! Appender trait for encoded log output destinations

use super::{error::Result, log_event::LogEvent};

pub trait Appender: Send {
    fn append(&mut self, event: &LogEvent) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
