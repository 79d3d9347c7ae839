//! Transport trait.

use crate::error::TransportError;
use crate::key::ContentKey;

/// Request boundary between the site layer and a SiteXML server.
///
/// Every method performs exactly one request and reports exactly one outcome.
/// Implementations must not retry.
pub trait Transport: Send + Sync {
    /// Fetch the raw site description document.
    fn fetch_tree(&self) -> Result<String, TransportError>;

    /// Fetch a content block by id or path.
    fn fetch_content(&self, key: &ContentKey) -> Result<String, TransportError>;

    /// Submit new markup for the content block with the given id.
    fn save_content(&self, id: i64, content: &str) -> Result<(), TransportError>;

    /// Submit a complete site description document.
    fn save_tree(&self, xml: &str) -> Result<(), TransportError>;
}
