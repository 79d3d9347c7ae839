//! Completion notifications for site operations.
//!
//! Every [`Site`](crate::Site) operation delivers exactly one [`Notification`]
//! to each live subscriber. Subscribe with [`Site::subscribe`](crate::Site::subscribe).

use std::sync::{Mutex, mpsc};

use sx_transport::{ContentKey, FailureKind};

/// Outcome of a single site operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Tree fetched, validated and swapped in.
    TreeLoaded,
    /// Tree document was unparsable or its root is not `site`.
    TreeInvalid,
    /// Tree fetch failed.
    TreeLoadFailed(FailureKind),
    /// Content fetched and cached.
    ContentLoaded { key: ContentKey },
    /// Content fetch failed.
    ContentLoadFailed { key: ContentKey, kind: FailureKind },
    /// Content block saved.
    ContentSaved { id: i64 },
    /// Server refused the content save; the caller must authenticate.
    ContentSaveUnauthorized { id: i64 },
    /// Content save failed for any other reason.
    ContentSaveFailed { id: i64, kind: FailureKind },
    /// Whole tree saved.
    TreeSaved,
    /// Server refused the tree save; the caller must authenticate.
    TreeSaveUnauthorized,
    /// Tree save failed for any other reason.
    TreeSaveFailed(FailureKind),
}

impl Notification {
    /// Stable event name (e.g. `tree-loaded`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TreeLoaded => "tree-loaded",
            Self::TreeInvalid => "tree-invalid",
            Self::TreeLoadFailed(_) => "tree-load-failed",
            Self::ContentLoaded { .. } => "content-loaded",
            Self::ContentLoadFailed { .. } => "content-load-failed",
            Self::ContentSaved { .. } => "content-saved",
            Self::ContentSaveUnauthorized { .. } => "content-save-unauthorized",
            Self::ContentSaveFailed { .. } => "content-save-failed",
            Self::TreeSaved => "tree-saved",
            Self::TreeSaveUnauthorized => "tree-save-unauthorized",
            Self::TreeSaveFailed(_) => "tree-save-failed",
        }
    }

    /// True for the two save outcomes that call for re-authentication.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::ContentSaveUnauthorized { .. } | Self::TreeSaveUnauthorized
        )
    }
}

/// Receiver for site notifications.
///
/// Wraps a [`std::sync::mpsc::Receiver`]. Block with [`recv()`](Self::recv)
/// or poll with [`try_recv()`](Self::try_recv).
pub struct NotificationReceiver {
    rx: mpsc::Receiver<Notification>,
}

impl NotificationReceiver {
    /// Wait for the next notification (blocking).
    ///
    /// Returns `None` when the site is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<Notification> {
        self.rx.recv().ok()
    }

    /// Try to receive a notification without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<Notification> {
        self.rx.try_recv().ok()
    }
}

/// Fan-out of notifications to every subscriber.
#[derive(Default)]
pub(crate) struct Notifier {
    senders: Mutex<Vec<mpsc::Sender<Notification>>>,
}

impl Notifier {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub(crate) fn subscribe(&self) -> NotificationReceiver {
        let (tx, rx) = mpsc::channel();
        self.senders.lock().unwrap().push(tx);
        NotificationReceiver { rx }
    }

    /// Deliver `notification` to all subscribers, dropping disconnected ones.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub(crate) fn emit(&self, notification: &Notification) {
        tracing::debug!(event = notification.name(), "Notify");
        self.senders
            .lock()
            .unwrap()
            .retain(|tx| tx.send(notification.clone()).is_ok());
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.senders.lock().unwrap().len()
    }
}
