//! Error types for site loading.

use sx_transport::{FailureKind, TransportError};
use sx_xml::XmlError;

/// Error loading the site description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Fetching the document failed.
    #[error("failed to fetch site description: {0}")]
    Transport(#[from] TransportError),

    /// Document is not well-formed XML.
    #[error("site description is not valid XML: {0}")]
    Xml(#[from] XmlError),

    /// Document element is not `site`.
    #[error("site description has root <{0}>, expected <site>")]
    InvalidRoot(String),
}

impl LoadError {
    /// True when the document was fetched but rejected.
    #[must_use]
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, Self::Xml(_) | Self::InvalidRoot(_))
    }

    /// Transport failure category, if the fetch itself failed.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Transport(err) => Some(err.kind()),
            Self::Xml(_) | Self::InvalidRoot(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_message() {
        let err = LoadError::InvalidRoot("html".to_owned());

        assert_eq!(
            err.to_string(),
            "site description has root <html>, expected <site>"
        );
        assert!(err.is_invalid_document());
        assert_eq!(err.failure_kind(), None);
    }

    #[test]
    fn test_transport_kind() {
        let err = LoadError::from(TransportError::from_status(503, "http://x/?sitexml"));

        assert!(!err.is_invalid_document());
        assert_eq!(err.failure_kind(), Some(FailureKind::ServerError));
    }
}
