//! Error types for nodeapp-rpc.

use thiserror::Error;

/// Main error type for all routing operations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// No handler registered for the requested api name.
    ///
    /// This is an expected, non-fatal outcome: the caller translates it into
    /// a structured "unknown method" reply rather than treating it as a fault.
    #[error("no handler registered for api name: {0}")]
    UnknownApi(String),

    /// A dispatched message carried no api name field.
    #[error("message has no api name field")]
    MissingApiName,

    /// Registration attempted with an empty api name.
    #[error("api name must be non-empty")]
    EmptyApiName,

    /// Two registrations share an api name. Detected when the table is built.
    #[error("duplicate handler registration for api name: {0}")]
    DuplicateHandler(String),

    /// JSON (de)serialization error on a typed payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure signalled by a script action invocation.
    #[error("script action failed: {0}")]
    Script(String),

    /// I/O error while writing to a diagnostic sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using RpcError.
pub type Result<T> = std::result::Result<T, RpcError>;
