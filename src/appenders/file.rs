//! File appender implementation

use super::writer::WriterAppender;
use crate::core::{EncoderConfig, Result};
use crate::encoder::Schema;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

/// Appends newline-delimited JSON to a file
pub type FileAppender = WriterAppender<BufWriter<File>>;

impl WriterAppender<BufWriter<File>> {
    /// Open `path` in append mode, creating it if missing
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logstash_encoder::appenders::FileAppender;
    /// use logstash_encoder::core::EncoderConfig;
    /// use logstash_encoder::encoder::Schema;
    ///
    /// let appender = FileAppender::open("/var/log/app.json", Schema::Nested, EncoderConfig::default())
    ///     .unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P, schema: Schema, config: EncoderConfig) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), %schema, "opened file appender");

        let mut appender = WriterAppender::new(BufWriter::new(file), schema, config)?;
        appender.rename(format!("file-{}", schema));
        Ok(appender)
    }
}
