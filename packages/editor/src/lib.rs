//! # Pagecraft Editor
//!
//! Editing core for a visual document editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: element tree + styles + ids       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession orchestration           │
//! │  - checkpoint-then-mutate history protocol  │
//! │  - clipboard copy/paste with deep cloning   │
//! │  - sibling reordering by positioning mode   │
//! │  - debounced undo gate over pending ops     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ collaborators: stage, dialogs, components   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Checkpoint-then-mutate**: every mutating command pushes a snapshot
//!    of the pre-mutation state before touching the tree
//! 2. **Explicit session state**: history, clipboard, and selection are
//!    fields of one [`EditSession`], never ambient globals
//! 3. **Single-threaded cooperative scheduling**: suspension happens only
//!    at the debounce timer and the undo quiescence wait; an embedding
//!    that introduces real parallelism must wrap the session in a mutex
//!    or actor boundary to keep the same serialization guarantee
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_document::{Document, Element, ElementKind, IdGenerator};
//! use pagecraft_editor::EditSession;
//!
//! let document = Document::new(Element::new("root", ElementKind::Container))?;
//! let mut session = EditSession::new(document, IdGenerator::new("landing-page"));
//!
//! session.set_selection(vec!["hero".into()]);
//! session.copy_selection();
//! session.paste()?;
//!
//! session.undo().await?;
//! session.redo().await?;
//! ```

mod clipboard;
mod collaborators;
mod errors;
mod history;
mod invalidation;
mod ordering;
mod session;

pub use clipboard::{copy_subtree, Clipboard, ClipboardItem};
pub use collaborators::{
    ComponentRenderer, HeadlessNotifier, HeadlessStage, Notifier, NullRenderer, Stage,
};
pub use errors::EditError;
pub use history::{HistorySnapshot, HistoryStore, OperationGuard, PendingOperations};
pub use invalidation::InvalidationManager;
pub use ordering::{move_elements, MoveDirection, StackingMode};
pub use session::{EditIntent, EditSession, Viewport};

// Re-export the document model for convenience
pub use pagecraft_document::{
    Document, DocumentError, Element, ElementKind, IdGenerator, PositionMode, StyleRecord,
    StyleSheet, StyleViewport,
};
