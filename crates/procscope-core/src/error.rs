//! Error types for procscope.

use thiserror::Error;

/// Result type alias using `ProcessError`.
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Errors that can occur while mining or analysing a process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The event log contained no events.
    #[error("Event log is empty")]
    EmptyLog,

    /// An event carried a timestamp that could not be parsed.
    #[error("Malformed event #{index} (case '{case_id}'): timestamp '{timestamp}' {reason}")]
    MalformedEvent {
        /// Position of the event in the input log.
        index: usize,
        /// Case the event belongs to.
        case_id: String,
        /// Raw timestamp value.
        timestamp: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The requested optimization strategy does not exist.
    #[error("Unknown optimization strategy: {0}")]
    UnknownStrategy(String),

    /// Two distinct activities map to the same graph node id.
    #[error("Node id collision: '{first}' and '{second}' both map to '{id}'")]
    NodeIdCollision {
        /// The colliding node id.
        id: String,
        /// Activity that claimed the id first.
        first: String,
        /// Activity that collided with it.
        second: String,
    },

    /// A process graph violated its structural invariants.
    #[error("Invalid process graph: {0}")]
    InvalidGraph(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ProcessError {
    /// Create a malformed event error.
    #[must_use]
    pub fn malformed_event(
        index: usize,
        case_id: impl Into<String>,
        timestamp: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ProcessError::MalformedEvent {
            index,
            case_id: case_id.into(),
            timestamp: timestamp.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid graph error.
    #[must_use]
    pub fn invalid_graph(msg: impl Into<String>) -> Self {
        ProcessError::InvalidGraph(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        ProcessError::ConfigError(msg.into())
    }

    /// Returns true if the error was caused by the caller's input.
    ///
    /// Input errors abort the current run and are never retried internally.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ProcessError::EmptyLog
                | ProcessError::MalformedEvent { .. }
                | ProcessError::UnknownStrategy(_)
                | ProcessError::NodeIdCollision { .. }
                | ProcessError::InvalidGraph(_)
        )
    }

    /// Short stable identifier for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ProcessError::EmptyLog => "empty_log",
            ProcessError::MalformedEvent { .. } => "malformed_event",
            ProcessError::UnknownStrategy(_) => "unknown_strategy",
            ProcessError::NodeIdCollision { .. } => "node_id_collision",
            ProcessError::InvalidGraph(_) => "invalid_graph",
            ProcessError::ConfigError(_) => "config",
            ProcessError::SerializationError(_) => "serialization",
            ProcessError::IoError(_) => "io",
        }
    }
}

impl From<serde_json::Error> for ProcessError {
    fn from(err: serde_json::Error) -> Self {
        ProcessError::SerializationError(err.to_string())
    }
}
