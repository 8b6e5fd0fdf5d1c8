//! Error types for the encoder

pub type Result<T> = std::result::Result<T, EncoderError>;

#[derive(Debug, thiserror::Error)]
pub enum EncoderError {
    /// IO error with the operation that failed
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Encode or close called before a sink was attached
    #[error("Encoder has no output sink; call start() first")]
    NotStarted,

    /// Append attempted after the appender was stopped
    #[error("Appender '{0}' is stopped")]
    Stopped(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl EncoderError {
    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        EncoderError::IoOperation {
            operation: operation.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        EncoderError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EncoderError::Other(msg.into())
    }

    /// True when the failure came from the output sink
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EncoderError::IoOperation { .. } | EncoderError::IoError(_)
        )
    }
}
