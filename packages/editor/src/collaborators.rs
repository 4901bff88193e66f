//! External collaborator seams.
//!
//! The editing core drives rendering surfaces, dialogs, and component
//! expansion through these narrow traits. Headless implementations keep
//! the core fully usable in tests and embeddings without a UI.

use crate::EditError;
use futures::future::BoxFuture;
use pagecraft_document::{Element, IdGenerator};

/// Yes/no prompts and error reporting.
pub trait Notifier {
    /// Ask the user to confirm a destructive action.
    fn confirm<'a>(&'a self, message: &'a str) -> BoxFuture<'a, bool>;

    /// Surface an operation failure. Must not touch editor state.
    fn notify_error(&self, message: &str);
}

/// Re-derives rendered markup for a component element from its payload.
///
/// Every id the renderer mints must come from `ids`: the generator is
/// monotonic for the whole session, which keeps regenerated nested ids
/// from colliding with any sibling or ancestor.
pub trait ComponentRenderer {
    fn render(&self, element: &mut Element, ids: &mut IdGenerator) -> Result<(), EditError>;
}

/// Toggles the interactive editing affordances on a live element.
///
/// Must be idempotent and side-effect-free when called with the current
/// state.
pub trait Stage {
    fn set_editable(&self, element_id: &str, editable: bool);
}

/// Notifier that answers every prompt the same way and logs errors.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessNotifier {
    pub accept: bool,
}

impl Default for HeadlessNotifier {
    fn default() -> Self {
        Self { accept: true }
    }
}

impl Notifier for HeadlessNotifier {
    fn confirm<'a>(&'a self, _message: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(std::future::ready(self.accept))
    }

    fn notify_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Stage with no rendering surface attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessStage;

impl Stage for HeadlessStage {
    fn set_editable(&self, _element_id: &str, _editable: bool) {}
}

/// Renderer for embeddings without expandable components.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl ComponentRenderer for NullRenderer {
    fn render(&self, _element: &mut Element, _ids: &mut IdGenerator) -> Result<(), EditError> {
        Ok(())
    }
}
