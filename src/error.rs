use thiserror::Error;

/// Failures of a source operation.
///
/// Browse operations (`search`, `featured`, `latest`, `popular`) never
/// return these; they log and degrade to an empty result. Detail and stream
/// resolution return them to the caller.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("no playable streams found for {0}")]
    NoStreamsFound(String),

    #[error("no stream URL for episode {0}")]
    MissingStreamUrl(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SourceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn shape(msg: impl std::fmt::Display) -> Self {
        Self::Shape(msg.to_string())
    }

    /// Network failure or a non-2xx status.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let err = SourceError::Status {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(503));
        assert!(!SourceError::not_found("x").is_transport());
        assert!(SourceError::not_found("x").is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SourceError::NoStreamsFound("cartoon_1936".to_string()).to_string(),
            "no playable streams found for cartoon_1936"
        );
    }
}
