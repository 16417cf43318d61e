//! The shared layout document store.

use crate::error::{StoreError, StoreResult};
use parking_lot::RwLock;
use seatplan_layout::Layout;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

/// The fixed document id for the one layout document of the deployment.
pub const LAYOUT_DOC_ID: &str = "1";

/// A remote key-value store holding the whole layout document.
///
/// The store is the single arbiter between concurrent sessions: `upsert`
/// replaces the entire document, last writer wins. `subscribe` delivers a
/// notification with the new document value after every upsert — including
/// upserts issued by the subscriber itself, so callers must be robust to
/// receiving their own echo.
pub trait DocumentStore: Send + Sync {
    /// Reads a document by id. `Ok(None)` means the document does not exist.
    fn read(&self, doc_id: &str) -> StoreResult<Option<Layout>>;

    /// Creates or replaces a document.
    fn upsert(&self, doc_id: &str, layout: &Layout) -> StoreResult<()>;

    /// Subscribes to update notifications for a document.
    ///
    /// The receiver yields the full new document value after each upsert.
    fn subscribe(&self, doc_id: &str) -> StoreResult<Receiver<Layout>>;
}

/// An in-memory document store with failure injection.
///
/// Notifications fan out to every live subscriber of the written document;
/// disconnected subscribers are dropped on the next upsert.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, Layout>>,
    subscribers: RwLock<HashMap<String, Vec<Sender<Layout>>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent reads fail, for exercising error paths.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent upserts fail, for exercising error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns true if a document exists.
    pub fn contains(&self, doc_id: &str) -> bool {
        self.documents.read().contains_key(doc_id)
    }

    /// Number of live subscribers for a document.
    pub fn subscriber_count(&self, doc_id: &str) -> usize {
        self.subscribers
            .read()
            .get(doc_id)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    /// Delivers a notification to every subscriber of `doc_id`, as if
    /// another session had written the document.
    ///
    /// Also replaces the stored document, so a subsequent `read` observes
    /// the same value the notification carried.
    pub fn inject_remote_write(&self, doc_id: &str, layout: &Layout) {
        self.documents
            .write()
            .insert(doc_id.to_string(), layout.clone());
        self.notify(doc_id, layout);
    }

    fn notify(&self, doc_id: &str, layout: &Layout) {
        let mut subscribers = self.subscribers.write();
        if let Some(subs) = subscribers.get_mut(doc_id) {
            subs.retain(|tx| tx.send(layout.clone()).is_ok());
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self, doc_id: &str) -> StoreResult<Option<Layout>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::read("injected read failure"));
        }
        Ok(self.documents.read().get(doc_id).cloned())
    }

    fn upsert(&self, doc_id: &str, layout: &Layout) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write("injected write failure"));
        }
        self.documents
            .write()
            .insert(doc_id.to_string(), layout.clone());
        tracing::debug!(doc_id, "document upserted");

        // Echo contract: the writer's own subscription is notified too.
        self.notify(doc_id, layout);
        Ok(())
    }

    fn subscribe(&self, doc_id: &str) -> StoreResult<Receiver<Layout>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .write()
            .entry(doc_id.to_string())
            .or_default()
            .push(tx);
        Ok(rx)
    }
}
