//! # History Store
//!
//! Undo/redo snapshots plus in-flight operation tracking.
//!
//! ## Design
//!
//! - Two tail-discipline stacks of immutable document snapshots
//! - A checkpoint is captured and pushed BEFORE each mutating command, so
//!   undo always restores the pre-mutation state
//! - New checkpoints clear the redo stack; undo/redo themselves never do
//! - A pending-operation counter tracks mutations whose completion is
//!   asynchronous relative to an undo request (e.g. awaiting a render
//!   pass); undo waits for it to settle, with a timeout

use crate::EditError;
use pagecraft_document::Document;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Opaque, self-contained capture of a document, sufficient to restore it.
///
/// Snapshots are immutable once pushed; restoring hands back a private copy
/// and never mutates the stored instance.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    state: Document,
}

impl HistorySnapshot {
    pub fn capture(document: &Document) -> Self {
        Self {
            state: document.clone(),
        }
    }

    pub fn restore(&self) -> Document {
        self.state.clone()
    }
}

/// Count of structural mutations still settling.
#[derive(Debug, Default)]
pub struct PendingOperations {
    count: AtomicUsize,
    settled: Notify,
}

impl PendingOperations {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn begin(pending: &Arc<PendingOperations>) -> OperationGuard {
        pending.count.fetch_add(1, Ordering::SeqCst);
        OperationGuard {
            pending: Arc::clone(pending),
        }
    }

    /// Resolve once no operation is in flight.
    pub async fn wait_settled(&self) {
        loop {
            if self.count() == 0 {
                return;
            }
            let notified = self.settled.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            // the last guard may have dropped before we registered
            if self.count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// RAII handle for one in-flight mutating operation.
///
/// The counter increments when the guard is created and decrements when it
/// drops, on completion and failure paths alike.
#[derive(Debug)]
pub struct OperationGuard {
    pending: Arc<PendingOperations>,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        if self.pending.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.pending.settled.notify_waiters();
        }
    }
}

/// Undo/redo store for document editing.
#[derive(Debug)]
pub struct HistoryStore {
    /// Snapshots undo will restore (most recent last)
    undo_stack: Vec<HistorySnapshot>,

    /// Snapshots redo will restore (most recent last)
    redo_stack: Vec<HistorySnapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    pending: Arc<PendingOperations>,
}

impl HistoryStore {
    /// Create a history store with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            pending: Arc::new(PendingOperations::default()),
        }
    }

    /// Capture `document` as the state the next undo restores.
    ///
    /// Called before the mutation is applied. Clears the redo stack: a new
    /// edit invalidates the undone future.
    pub fn checkpoint(&mut self, document: &Document) {
        self.undo_stack.push(HistorySnapshot::capture(document));

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Swap the live state for the top of the undo stack: `current` is
    /// pushed to the redo stack and the popped snapshot is restored.
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(HistorySnapshot::capture(current));
        Some(snapshot.restore())
    }

    /// Symmetric to [`HistoryStore::undo`], against the redo stack.
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(HistorySnapshot::capture(current));
        Some(snapshot.restore())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Mark the start of a mutating operation; the counter drops with the
    /// guard.
    pub fn begin_operation(&self) -> OperationGuard {
        PendingOperations::begin(&self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.count()
    }

    /// Shared handle for collaborators that settle asynchronously.
    pub fn pending(&self) -> Arc<PendingOperations> {
        Arc::clone(&self.pending)
    }

    /// Wait until no mutating operation is in flight.
    pub async fn wait_settled(&self, timeout: Duration) -> Result<(), EditError> {
        tokio::time::timeout(timeout, self.pending.wait_settled())
            .await
            .map_err(|_| EditError::PendingTimeout)
    }

    /// Drop all undo/redo history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{Element, ElementKind};

    fn document_with_text(content: &str) -> Document {
        let root = Element::new("root", ElementKind::Container).with_children(vec![
            Element::new("t", ElementKind::Text).with_content(content),
        ]);
        Document::new(root).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = HistoryStore::new();
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.undo_levels(), 0);
        assert_eq!(store.redo_levels(), 0);
    }

    #[test]
    fn test_checkpoint_then_undo_restores_pre_mutation_state() {
        let mut store = HistoryStore::new();
        let before = document_with_text("hello");

        store.checkpoint(&before);
        let after = document_with_text("world");

        let restored = store.undo(&after).unwrap();
        assert_eq!(restored, before);
        assert_eq!(store.redo_levels(), 1);

        let redone = store.redo(&restored).unwrap();
        assert_eq!(redone, after);
    }

    #[test]
    fn test_restore_hands_back_a_private_copy() {
        let original = document_with_text("hello");
        let snapshot = HistorySnapshot::capture(&original);

        let mut first = snapshot.restore();
        first.find_element_mut("t").unwrap().content = Some("mutated".into());

        // the stored instance is untouched by mutations of a restored copy
        assert_eq!(snapshot.restore(), original);
    }

    #[test]
    fn test_checkpoint_clears_redo() {
        let mut store = HistoryStore::new();
        let doc = document_with_text("a");

        store.checkpoint(&doc);
        store.undo(&doc).unwrap();
        assert_eq!(store.redo_levels(), 1);

        store.checkpoint(&doc);
        assert_eq!(store.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_trims_oldest() {
        let mut store = HistoryStore::with_max_levels(2);
        let doc = document_with_text("a");

        store.checkpoint(&doc);
        store.checkpoint(&doc);
        store.checkpoint(&doc);

        assert_eq!(store.undo_levels(), 2);
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut store = HistoryStore::new();
        let doc = document_with_text("a");
        assert!(store.undo(&doc).is_none());
        assert_eq!(store.redo_levels(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_settled_blocks_until_guard_drops() {
        let store = HistoryStore::new();
        let guard = store.begin_operation();
        assert_eq!(store.pending_count(), 1);

        let wait = store.wait_settled(Duration::from_secs(10));
        let release = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(guard);
        };

        let (result, ()) = tokio::join!(wait, release);
        assert!(result.is_ok());
        assert_eq!(store.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_settled_times_out() {
        let store = HistoryStore::new();
        let _guard = store.begin_operation();

        let result = store.wait_settled(Duration::from_secs(10)).await;
        assert!(matches!(result, Err(EditError::PendingTimeout)));
    }

    #[test]
    fn test_guard_decrements_on_drop() {
        let store = HistoryStore::new();
        {
            let _a = store.begin_operation();
            let _b = store.begin_operation();
            assert_eq!(store.pending_count(), 2);
        }
        assert_eq!(store.pending_count(), 0);
    }
}
