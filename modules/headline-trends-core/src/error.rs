//! Typed errors for the headline queries.

use thiserror::Error;

/// Everything that can abort a sample or occurrence request.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// A required query parameter was absent or empty
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The search backend call failed
    #[error("backend error: {0}")]
    Backend(#[source] anyhow::Error),

    /// A month label from the backend is not `YYYY-MM`
    #[error("invalid month label: {label:?}")]
    Format { label: String },
}

impl TrendsError {
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// HTTP status the transport should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter(_) => 400,
            Self::Backend(_) | Self::Format { .. } => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for headline queries.
pub type TrendsResult<T> = std::result::Result<T, TrendsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_is_bad_request() {
        let err = TrendsError::MissingParameter("keyword");
        assert_eq!(err.status_code(), 400);
        assert!(err.is_client_error());
    }

    #[test]
    fn backend_and_format_are_server_errors() {
        let backend = TrendsError::backend(anyhow::anyhow!("connection refused"));
        let format = TrendsError::Format {
            label: "2020/01".into(),
        };
        assert_eq!(backend.status_code(), 500);
        assert_eq!(format.status_code(), 500);
        assert!(!backend.is_client_error());
    }

    #[test]
    fn format_error_names_the_label() {
        let err = TrendsError::Format {
            label: "bogus".into(),
        };
        assert_eq!(err.to_string(), "invalid month label: \"bogus\"");
    }
}
