//! Transport error types.

/// Coarse failure category callers branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Server refused the request for lack of credentials (HTTP 401).
    Unauthorized,
    /// Other 4xx status.
    ClientError,
    /// 5xx status.
    ServerError,
    /// Network failure, timeout or unexpected status.
    Other,
}

impl FailureKind {
    /// Categorize an HTTP status that is not a success.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Unauthorized => "unauthorized",
            Self::ClientError => "client error",
            Self::ServerError => "server error",
            Self::Other => "transport failure",
        };
        f.write_str(text)
    }
}

/// Error from a transport request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Server answered 401.
    #[error("unauthorized: {url}")]
    Unauthorized {
        /// Request URL.
        url: String,
    },

    /// Server answered with a non-success status other than 401.
    #[error("HTTP error: {status} - {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Request(#[from] ureq::Error),
}

impl TransportError {
    /// Build the error for a non-success status.
    #[must_use]
    pub fn from_status(status: u16, url: impl Into<String>) -> Self {
        let url = url.into();
        if status == 401 {
            Self::Unauthorized { url }
        } else {
            Self::Status { status, url }
        }
    }

    /// Failure category of this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Unauthorized { .. } => FailureKind::Unauthorized,
            Self::Status { status, .. } => FailureKind::from_status(*status),
            Self::Request(_) => FailureKind::Other,
        }
    }

    /// HTTP status, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Request(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_failure_kind_from_status() {
        assert_eq!(FailureKind::from_status(401), FailureKind::Unauthorized);
        assert_eq!(FailureKind::from_status(403), FailureKind::ClientError);
        assert_eq!(FailureKind::from_status(404), FailureKind::ClientError);
        assert_eq!(FailureKind::from_status(500), FailureKind::ServerError);
        assert_eq!(FailureKind::from_status(503), FailureKind::ServerError);
        assert_eq!(FailureKind::from_status(302), FailureKind::Other);
    }

    #[test]
    fn test_from_status_401_is_unauthorized() {
        let err = TransportError::from_status(401, "http://x/");

        assert!(matches!(err, TransportError::Unauthorized { .. }));
        assert_eq!(err.kind(), FailureKind::Unauthorized);
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_from_status_keeps_code_and_url() {
        let err = TransportError::from_status(502, "http://x/?sitexml");

        assert_eq!(err.kind(), FailureKind::ServerError);
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "HTTP error: 502 - http://x/?sitexml");
    }

    #[test]
    fn test_request_failure_is_other_and_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::from(ureq::Error::Io(io));

        assert_eq!(err.kind(), FailureKind::Other);
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("HTTP request failed: "));
        assert!(err.to_string().contains("refused"));
    }
}
