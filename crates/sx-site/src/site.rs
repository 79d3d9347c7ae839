//! Site handle: loading, caching and saving against a [`Transport`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use sx_cache::MemoryContentCache;
//! use sx_site::Site;
//! use sx_transport::HttpTransport;
//!
//! let transport = Arc::new(HttpTransport::new("https://example.com"));
//! let site = Arc::new(Site::new(transport, Box::new(MemoryContentCache::new())));
//! let events = site.subscribe();
//!
//! site.load_tree()?;
//! let snapshot = site.snapshot();
//! let theme = snapshot.resolve_theme_for_page(1);
//! ```

use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};

use sx_cache::ContentCache;
use sx_transport::{ContentKey, Transport, TransportError};
use sx_xml::XmlDocument;

use crate::builder::{build, is_site_document};
use crate::error::LoadError;
use crate::model::{Content, Page, SiteModel, Theme};
use crate::notification::{Notification, NotificationReceiver, Notifier};

/// A SiteXML site as seen by a client.
///
/// # Thread Safety
///
/// Shareable behind an `Arc`:
/// - the current model is an `RwLock<Arc<SiteModel>>`, replaced wholesale on
///   a successful load, so a [`snapshot`](Self::snapshot) taken earlier keeps
///   answering from the old tree
/// - the content cache is internally synchronized
///
/// Every operation reports its outcome twice: as a return value, and as
/// exactly one [`Notification`] to every subscriber. Nothing is retried.
pub struct Site {
    transport: Arc<dyn Transport>,
    cache: Box<dyn ContentCache>,
    /// Current model snapshot (atomically swappable).
    current: RwLock<Arc<SiteModel>>,
    notifier: Notifier,
}

impl Site {
    /// Create a site with an empty model.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, cache: Box<dyn ContentCache>) -> Self {
        Self {
            transport,
            cache,
            current: RwLock::new(Arc::new(SiteModel::default())),
            notifier: Notifier::default(),
        }
    }

    /// Current model snapshot.
    ///
    /// The returned `Arc` stays valid and unchanged across later reloads.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SiteModel> {
        Arc::clone(&self.current.read().unwrap())
    }

    /// Subscribe to operation notifications.
    ///
    /// Only operations completed after this call are delivered.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn subscribe(&self) -> NotificationReceiver {
        self.notifier.subscribe()
    }

    /// Fetch the site description and replace the current model.
    ///
    /// Emits `TreeLoaded`, `TreeInvalid` or `TreeLoadFailed`. On any error
    /// the previous model stays current.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Transport`] if the fetch fails, and
    /// [`LoadError::Xml`] / [`LoadError::InvalidRoot`] if the document is
    /// rejected.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn load_tree(&self) -> Result<Arc<SiteModel>, LoadError> {
        let xml = match self.transport.fetch_tree() {
            Ok(xml) => xml,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch site description");
                self.notifier.emit(&Notification::TreeLoadFailed(e.kind()));
                return Err(e.into());
            }
        };
        self.load_tree_from_str(&xml)
    }

    /// Parse and install a site description that is already in hand.
    ///
    /// Emits `TreeLoaded` or `TreeInvalid`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Xml`] for malformed XML and
    /// [`LoadError::InvalidRoot`] if the root element is not `site`.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn load_tree_from_str(&self, xml: &str) -> Result<Arc<SiteModel>, LoadError> {
        match Self::parse_tree(xml) {
            Ok(model) => {
                let model = Arc::new(model);
                *self.current.write().unwrap() = Arc::clone(&model);
                tracing::info!(
                    pages = model.page_count(),
                    themes = model.themes.len(),
                    "Site description loaded"
                );
                self.notifier.emit(&Notification::TreeLoaded);
                Ok(model)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected site description");
                self.notifier.emit(&Notification::TreeInvalid);
                Err(e)
            }
        }
    }

    fn parse_tree(xml: &str) -> Result<SiteModel, LoadError> {
        let doc = XmlDocument::parse(xml)?;
        if !is_site_document(&doc) {
            return Err(LoadError::InvalidRoot(doc.root().tag().to_owned()));
        }
        Ok(build(&doc))
    }

    /// Fetch a content block and cache it under [`ContentKey::cache_key`].
    ///
    /// Emits `ContentLoaded` or `ContentLoadFailed`. A failed fetch leaves any
    /// previously cached value in place.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the fetch fails.
    pub fn load_content(&self, key: &ContentKey) -> Result<String, TransportError> {
        match self.transport.fetch_content(key) {
            Ok(body) => {
                self.cache.put(&key.cache_key(), &body);
                tracing::debug!(%key, bytes = body.len(), "Content loaded");
                self.notifier
                    .emit(&Notification::ContentLoaded { key: key.clone() });
                Ok(body)
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "Failed to load content");
                self.notifier.emit(&Notification::ContentLoadFailed {
                    key: key.clone(),
                    kind: e.kind(),
                });
                Err(e)
            }
        }
    }

    /// Last content fetched for `key`, without touching the network.
    #[must_use]
    pub fn cached_content(&self, key: &ContentKey) -> Option<String> {
        self.cache.get(&key.cache_key())
    }

    /// Submit new markup for content block `id`.
    ///
    /// Emits `ContentSaved`, `ContentSaveUnauthorized` or `ContentSaveFailed`.
    /// The cache is not updated; reload the content to see the stored value.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the save is refused or fails.
    pub fn save_content(&self, id: i64, content: &str) -> Result<(), TransportError> {
        let result = self.transport.save_content(id, content);
        let notification = match &result {
            Ok(()) => {
                tracing::info!(id, "Content saved");
                Notification::ContentSaved { id }
            }
            Err(TransportError::Unauthorized { .. }) => {
                tracing::warn!(id, "Content save unauthorized");
                Notification::ContentSaveUnauthorized { id }
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to save content");
                Notification::ContentSaveFailed { id, kind: e.kind() }
            }
        };
        self.notifier.emit(&notification);
        result
    }

    /// Submit a complete site description.
    ///
    /// Emits `TreeSaved`, `TreeSaveUnauthorized` or `TreeSaveFailed`. The
    /// current model is not replaced; call [`load_tree`](Self::load_tree)
    /// afterwards to pick up the saved tree.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the save is refused or fails.
    pub fn save_tree(&self, xml: &str) -> Result<(), TransportError> {
        let result = self.transport.save_tree(xml);
        let notification = match &result {
            Ok(()) => {
                tracing::info!(bytes = xml.len(), "Site description saved");
                Notification::TreeSaved
            }
            Err(TransportError::Unauthorized { .. }) => {
                tracing::warn!("Site description save unauthorized");
                Notification::TreeSaveUnauthorized
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save site description");
                Notification::TreeSaveFailed(e.kind())
            }
        };
        self.notifier.emit(&notification);
        result
    }

    /// Run one operation on a worker thread.
    ///
    /// The outcome arrives through the returned handle and, as usual, as a
    /// notification. There is no cancellation: a caller no longer interested
    /// in the result ignores it.
    pub fn spawn<T, F>(self: &Arc<Self>, op: F) -> JoinHandle<T>
    where
        F: FnOnce(&Site) -> T + Send + 'static,
        T: Send + 'static,
    {
        let site = Arc::clone(self);
        thread::spawn(move || op(&site))
    }

    /// Get a page by id from the current model.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn page(&self, id: i64) -> Option<Page> {
        self.snapshot().find_page_by_id(id).cloned()
    }

    /// Get a page-owned content block by id from the current model.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn content_block(&self, id: i64) -> Option<Content> {
        self.snapshot().find_content_by_id(id).cloned()
    }

    /// Get the effective theme of a page from the current model.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn theme_for_page(&self, page_id: i64) -> Option<Theme> {
        self.snapshot().resolve_theme_for_page(page_id).cloned()
    }
}
