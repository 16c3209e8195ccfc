use thiserror::Error;

/// The output could not be resumed, so nothing can be heard yet.
///
/// Always handled softly: the mixer logs it and leaves the graph as it was.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("no output device is available")]
    NoDevice,
    #[error("output stream refused to start: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
    #[cfg(feature = "serde")]
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
