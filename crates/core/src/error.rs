//! Error types for the Memoria domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Rejected submissions (blank input, a request already in flight) are not
//! errors; see `SubmitOutcome` in the assistant crate.

use thiserror::Error;

/// The top-level error type for all Memoria operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Responder errors ---
    #[error("Responder error: {0}")]
    Responder(#[from] ResponderError),

    // --- Environment errors ---
    #[error("Environment error: {0}")]
    Environment(#[from] EnvironmentError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of a pluggable reply backend.
///
/// The built-in rule engine never produces these.
#[derive(Debug, Clone, Error)]
pub enum ResponderError {
    #[error("Responder unavailable: {0}")]
    Unavailable(String),

    #[error("Responder timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Responder rejected the utterance: {0}")]
    Rejected(String),
}

/// Failures acquiring a device or terminal resource.
///
/// These are shown to the user as a notice and never stop a session.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Device unavailable: {device} — {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("Input stream closed: {0}")]
    InputClosed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responder_error_displays_correctly() {
        let err = Error::Responder(ResponderError::Timeout { timeout_ms: 2500 });
        assert!(err.to_string().contains("2500"));
        assert!(err.to_string().starts_with("Responder error"));
    }

    #[test]
    fn environment_error_displays_correctly() {
        let err = Error::Environment(EnvironmentError::DeviceUnavailable {
            device: "microphone".into(),
            reason: "permission denied".into(),
        });
        assert!(err.to_string().contains("microphone"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn io_error_converts_into_environment() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin gone");
        let err: Error = EnvironmentError::from(io).into();
        assert!(matches!(err, Error::Environment(EnvironmentError::Io(_))));
    }
}
