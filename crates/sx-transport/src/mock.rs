//! Mock transport implementation for testing.
//!
//! Provides [`MockTransport`] for unit testing without a server.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::TransportError;
use crate::key::ContentKey;
use crate::transport::Transport;

/// Canned answer for a request.
#[derive(Clone, Debug)]
enum Reply {
    Body(String),
    Status(u16),
}

impl Reply {
    fn into_result(self, url: &str) -> Result<String, TransportError> {
        match self {
            Self::Body(body) => Ok(body),
            Self::Status(status) => Err(TransportError::from_status(status, url)),
        }
    }
}

/// Mock transport for testing.
///
/// Serves a configurable site document and content blocks from memory and
/// records every save. Unknown content keys answer 404; a missing tree
/// answers 404 as well.
///
/// # Example
///
/// ```ignore
/// use sx_transport::{ContentKey, MockTransport, Transport};
///
/// let transport = MockTransport::new()
///     .with_tree(r#"<site name="Demo"/>"#)
///     .with_content(ContentKey::Id(3), "<p>Hi</p>");
///
/// assert!(transport.fetch_tree().is_ok());
/// assert_eq!(transport.fetch_content(&ContentKey::Id(3)).unwrap(), "<p>Hi</p>");
/// ```
#[derive(Debug)]
pub struct MockTransport {
    tree: RwLock<Reply>,
    contents: RwLock<HashMap<ContentKey, Reply>>,
    save_status: RwLock<Option<u16>>,
    saved_content: RwLock<Vec<(i64, String)>>,
    saved_trees: RwLock<Vec<String>>,
    requests: AtomicUsize,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            tree: RwLock::new(Reply::Status(404)),
            contents: RwLock::new(HashMap::new()),
            save_status: RwLock::new(None),
            saved_content: RwLock::new(Vec::new()),
            saved_trees: RwLock::new(Vec::new()),
            requests: AtomicUsize::new(0),
        }
    }
}

impl MockTransport {
    /// Create a new empty mock transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the given site document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_tree(self, xml: impl Into<String>) -> Self {
        self.set_tree(xml);
        self
    }

    /// Answer tree requests with an error status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_tree_status(self, status: u16) -> Self {
        *self.tree.write().unwrap() = Reply::Status(status);
        self
    }

    /// Serve a content block.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_content(self, key: ContentKey, body: impl Into<String>) -> Self {
        self.set_content(key, body);
        self
    }

    /// Answer requests for a content key with an error status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_content_status(self, key: ContentKey, status: u16) -> Self {
        self.set_content_status(key, status);
        self
    }

    /// Answer save requests with an error status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_save_status(self, status: u16) -> Self {
        *self.save_status.write().unwrap() = Some(status);
        self
    }

    /// Replace the served site document (simulates a server-side edit).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_tree(&self, xml: impl Into<String>) {
        *self.tree.write().unwrap() = Reply::Body(xml.into());
    }

    /// Replace a served content block.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content(&self, key: ContentKey, body: impl Into<String>) {
        self.contents
            .write()
            .unwrap()
            .insert(key, Reply::Body(body.into()));
    }

    /// Start answering a content key with an error status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content_status(&self, key: ContentKey, status: u16) {
        self.contents
            .write()
            .unwrap()
            .insert(key, Reply::Status(status));
    }

    /// Content saves accepted so far, in submission order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn saved_content(&self) -> Vec<(i64, String)> {
        self.saved_content.read().unwrap().clone()
    }

    /// Tree saves accepted so far, in submission order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn saved_trees(&self) -> Vec<String> {
        self.saved_trees.read().unwrap().clone()
    }

    /// Number of requests received, successful or not.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn save_result(&self, url: &str) -> Result<(), TransportError> {
        match *self.save_status.read().unwrap() {
            Some(status) => Err(TransportError::from_status(status, url)),
            None => Ok(()),
        }
    }
}

impl Transport for MockTransport {
    fn fetch_tree(&self) -> Result<String, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.tree.read().unwrap().clone().into_result("mock:/?sitexml")
    }

    fn fetch_content(&self, key: &ContentKey) -> Result<String, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let url = key.url("mock:");
        self.contents
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or(Reply::Status(404))
            .into_result(&url)
    }

    fn save_content(&self, id: i64, content: &str) -> Result<(), TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.save_result("mock:/")?;
        self.saved_content
            .write()
            .unwrap()
            .push((id, content.to_owned()));
        Ok(())
    }

    fn save_tree(&self, xml: &str) -> Result<(), TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.save_result("mock:/")?;
        self.saved_trees.write().unwrap().push(xml.to_owned());
        Ok(())
    }
}
