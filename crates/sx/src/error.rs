//! CLI error types.

use sx_config::ConfigError;
use sx_site::LoadError;
use sx_transport::TransportError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("not authorized to save {0}; authenticate with the site and try again")]
    Unauthorized(String),
}

impl CliError {
    /// Map a failed save, singling out 401 answers.
    pub(crate) fn from_save(err: TransportError, what: &str) -> Self {
        match err {
            TransportError::Unauthorized { .. } => Self::Unauthorized(what.to_owned()),
            other => Self::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_save_message() {
        let err = CliError::from_save(
            TransportError::from_status(401, "http://example.com/"),
            "content 12",
        );

        assert_eq!(
            err.to_string(),
            "not authorized to save content 12; authenticate with the site and try again"
        );
    }

    #[test]
    fn test_other_save_failure_passes_through() {
        let err = CliError::from_save(
            TransportError::from_status(500, "http://example.com/"),
            "site description",
        );

        assert!(matches!(err, CliError::Transport(_)));
        assert_eq!(err.to_string(), "HTTP error: 500 - http://example.com/");
    }
}
