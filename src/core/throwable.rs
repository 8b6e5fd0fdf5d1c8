//! Error snapshots attached to log events and their stack-trace text rendering

use super::log_event::CallerFrame;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Write as _;

const LINE_SEPARATOR: &str = "\n";
const CAUSED_BY: &str = "Caused by: ";
const SUPPRESSED: &str = "Suppressed: ";

/// Snapshot of an error, its stack frames, cause chain and suppressed errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThrowableProxy {
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub frames: Vec<CallerFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ThrowableProxy>>,
    #[serde(default)]
    pub suppressed: Vec<ThrowableProxy>,
}

impl ThrowableProxy {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Build a proxy from a Rust error and its `source()` chain.
    ///
    /// The outermost error is named after its type; sources are only known
    /// as trait objects and carry their message alone.
    pub fn from_error<E: Error + 'static>(error: &E) -> Self {
        let type_name = std::any::type_name::<E>();
        let short_name = type_name.rsplit("::").next().unwrap_or(type_name);

        let mut proxy = ThrowableProxy::new(short_name).with_message(error.to_string());
        proxy.cause = error.source().map(|source| Box::new(Self::from_source(source)));
        proxy
    }

    fn from_source(error: &(dyn Error + 'static)) -> Self {
        let mut proxy = ThrowableProxy::new("").with_message(error.to_string());
        proxy.cause = error.source().map(|source| Box::new(Self::from_source(source)));
        proxy
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_frames(mut self, frames: Vec<CallerFrame>) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_cause(mut self, cause: ThrowableProxy) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_suppressed(mut self, suppressed: ThrowableProxy) -> Self {
        self.suppressed.push(suppressed);
        self
    }

    /// Render the full multi-line stack trace text
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, None, 1, &[]);
        out
    }

    fn render_into(&self, out: &mut String, prefix: Option<&str>, indent: usize, enclosing: &[CallerFrame]) {
        push_indent(out, indent - 1);
        if let Some(prefix) = prefix {
            out.push_str(prefix);
        }
        self.push_first_line(out);
        out.push_str(LINE_SEPARATOR);

        let common = common_frames(&self.frames, enclosing);
        for frame in &self.frames[..self.frames.len() - common] {
            push_indent(out, indent);
            let _ = write!(out, "at {}", frame);
            out.push_str(LINE_SEPARATOR);
        }
        if common > 0 {
            push_indent(out, indent);
            let _ = write!(out, "... {} common frames omitted", common);
            out.push_str(LINE_SEPARATOR);
        }

        for suppressed in &self.suppressed {
            suppressed.render_into(out, Some(SUPPRESSED), indent + 1, &self.frames);
        }
        if let Some(cause) = &self.cause {
            cause.render_into(out, Some(CAUSED_BY), indent, &self.frames);
        }
    }

    fn push_first_line(&self, out: &mut String) {
        match (&self.message, self.class_name.is_empty()) {
            (Some(message), false) => {
                let _ = write!(out, "{}: {}", self.class_name, message);
            }
            (Some(message), true) => out.push_str(message),
            (None, _) => out.push_str(&self.class_name),
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Frames shared with the enclosing trace, counted from the outermost frame
fn common_frames(frames: &[CallerFrame], enclosing: &[CallerFrame]) -> usize {
    frames
        .iter()
        .rev()
        .zip(enclosing.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}
