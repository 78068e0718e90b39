//! Error types for Resumate operations.
//!
//! Every failure falls into one of two kinds:
//! - configuration problems, surfaced before any request leaves the process
//! - transport problems, raised by the backend call itself
//!
//! Unparseable model output is not an error: the normalizer returns `None`.

/// The main error type for evaluation operations.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// Missing credential, empty host, unsupported provider or invalid setting
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request exceeded its time budget
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend SDK failure or a response we could not interpret
    #[error("Provider error: {0}")]
    Provider(String),

    /// Parsed JSON did not match the evaluation result shape
    #[error("Schema error: {0}")]
    Schema(#[from] serde_json::Error),
}

impl EvalError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Map a reqwest failure onto the timeout or network variant
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Network(err)
        }
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, EvalError::Configuration(_))
    }

    /// Check if this error came from the backend call
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EvalError::Network(_)
                | EvalError::Timeout(_)
                | EvalError::Status { .. }
                | EvalError::Provider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(EvalError::configuration("unsupported provider: foo").is_configuration());
        assert!(!EvalError::configuration("x").is_transport());

        assert!(EvalError::timeout("120s elapsed").is_transport());
        assert!(EvalError::status(500, "boom").is_transport());
        assert!(EvalError::provider("no choices").is_transport());
    }

    #[test]
    fn test_status_display() {
        let err = EvalError::status(503, "model is loading");
        assert_eq!(err.to_string(), "HTTP status 503: model is loading");
    }

    #[test]
    fn test_schema_error_is_neither_kind() {
        let err: EvalError = serde_json::from_str::<u8>("\"nope\"").unwrap_err().into();
        assert!(!err.is_transport());
        assert!(!err.is_configuration());
    }
}
