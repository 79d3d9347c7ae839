//! Error types for XML parsing.

use std::str::Utf8Error;

/// Error while parsing a SiteXML document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XmlError {
    /// Malformed XML reported by the reader.
    #[error("XML parse error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error while decoding names.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Input ended while elements were still open.
    #[error("unclosed element <{0}>")]
    Unclosed(String),

    /// End tag does not match the innermost open element.
    #[error("mismatched end tag </{found}>, expected </{expected}>")]
    MismatchedEnd {
        /// Tag of the innermost open element.
        expected: String,
        /// Tag found in the end tag.
        found: String,
    },

    /// Document contains no element.
    #[error("document has no root element")]
    NoRoot,

    /// Elements are nested deeper than [`XmlDocument::MAX_DEPTH`](crate::XmlDocument::MAX_DEPTH).
    #[error("elements nested deeper than {0} levels")]
    TooDeep(usize),

    /// Document contains more than one top-level element.
    #[error("unexpected top-level element <{0}> after document element")]
    TrailingElement(String),
}
