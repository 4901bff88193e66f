//! # Edit Session
//!
//! Orchestrates the editing core. Every user-facing command enters here,
//! brackets its work with the checkpoint-then-mutate protocol, and
//! delegates structural work to the clipboard and ordering modules.
//!
//! All mutable editing state lives as explicit fields of the session: the
//! document, id allocation, history, clipboard, selection. Two sessions
//! never share state through ambient globals.

use crate::clipboard::{copy_subtree, Clipboard, ClipboardItem};
use crate::collaborators::{
    ComponentRenderer, HeadlessNotifier, HeadlessStage, Notifier, NullRenderer, Stage,
};
use crate::history::{HistoryStore, OperationGuard};
use crate::invalidation::InvalidationManager;
use crate::ordering::{move_elements, MoveDirection};
use crate::EditError;
use pagecraft_document::{Document, DocumentError, Element, ElementKind, IdGenerator, StyleViewport};
use std::time::Duration;
use tracing::{debug, warn};

/// Default quiet period for the undo/redo debounce gate.
const UNDO_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Ceiling on how long undo waits for in-flight operations to settle.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Drop location for pasted elements, relative to the visible viewport.
const PASTE_DROP_X: f64 = 100.0;
const PASTE_DROP_Y: f64 = 100.0;

/// Offset step between consecutive pasted elements, so repeated pastes
/// never perfectly overlap.
const PASTE_OFFSET_STEP: f64 = 20.0;

/// Visible-viewport scroll offsets; paste drop positions are anchored to
/// the viewport, not the canvas origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Which editor surface a kind-dispatched edit should open.
#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent {
    /// Open the component parameter panel
    ComponentParams { element_id: String },

    /// Open the text editor on the current content
    EditText { element_id: String, content: String },

    /// Open the raw html editor on the current content
    EditHtml { element_id: String, content: String },

    /// Open the file picker; completion arrives via
    /// [`EditSession::complete_image_edit`]
    PickImage { element_id: String },
}

/// One editing session over one document.
pub struct EditSession {
    document: Document,
    ids: IdGenerator,
    history: HistoryStore,
    clipboard: Clipboard,
    invalidation: InvalidationManager,
    selection: Vec<String>,
    viewport: Viewport,
    /// Pastes of the current buffer so far; staggers drop positions
    paste_count: u32,
    settle_timeout: Duration,
    notifier: Box<dyn Notifier>,
    renderer: Box<dyn ComponentRenderer>,
    stage: Box<dyn Stage>,
}

impl EditSession {
    /// Create a session with headless collaborators.
    pub fn new(document: Document, ids: IdGenerator) -> Self {
        Self {
            document,
            ids,
            history: HistoryStore::new(),
            clipboard: Clipboard::new(),
            invalidation: InvalidationManager::new(UNDO_DEBOUNCE),
            selection: Vec::new(),
            viewport: Viewport::default(),
            paste_count: 0,
            settle_timeout: SETTLE_TIMEOUT,
            notifier: Box::new(HeadlessNotifier::default()),
            renderer: Box::new(NullRenderer),
            stage: Box::new(HeadlessStage),
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn ComponentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.invalidation = InvalidationManager::new(delay);
        self
    }

    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn set_selection(&mut self, element_ids: Vec<String>) {
        self.selection = element_ids;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_levels(&self) -> usize {
        self.history.undo_levels()
    }

    pub fn redo_levels(&self) -> usize {
        self.history.redo_levels()
    }

    /// RAII guard for collaborator work that must delay undo until it
    /// settles (e.g. a render pass).
    pub fn begin_operation(&self) -> OperationGuard {
        self.history.begin_operation()
    }

    pub fn pending_operations(&self) -> usize {
        self.history.pending_count()
    }

    /// Undo the last mutating command.
    ///
    /// Clears the selection, waits out the debounce window, then waits for
    /// in-flight operations to settle before swapping snapshots. Returns
    /// `Ok(false)` when superseded by a newer request or when there is
    /// nothing to undo; `EditError::PendingTimeout` when operations never
    /// settle. Dropping the future cancels the request without touching
    /// state.
    pub async fn undo(&mut self) -> Result<bool, EditError> {
        self.set_selection(Vec::new());
        if !self.invalidation.ready().await {
            return Ok(false);
        }
        self.history.wait_settled(self.settle_timeout).await?;

        let Some(previous) = self.history.undo(&self.document) else {
            return Ok(false);
        };
        self.document = previous;
        debug!("undo restored previous document state");
        Ok(true)
    }

    /// Redo the last undone command.
    ///
    /// Gated only on the redo stack being non-empty: redo targets a state
    /// that was itself the result of an already-settled operation, so no
    /// pending-operation wait is needed.
    pub async fn redo(&mut self) -> Result<bool, EditError> {
        self.set_selection(Vec::new());
        if !self.invalidation.ready().await {
            return Ok(false);
        }

        let Some(next) = self.history.redo(&self.document) else {
            return Ok(false);
        };
        self.document = next;
        debug!("redo restored undone document state");
        Ok(true)
    }

    /// Copy the current selection into the clipboard.
    ///
    /// Section-content wrappers are substituted by their parent section
    /// (deduplicated). The root container is never copyable: it is logged
    /// and skipped while the rest of the batch proceeds. The clipboard is
    /// replaced wholesale, and only when at least one item was produced.
    pub fn copy_selection(&mut self) {
        let mut targets: Vec<String> = Vec::new();
        for id in &self.selection {
            let Some(element) = self.document.find_element(id) else {
                continue;
            };
            if element.section_content {
                // the semantic unit is the wrapping section, not its
                // content box
                let Some(parent) = self.document.parent_of(id) else {
                    continue;
                };
                let parent_id = parent.id.clone();
                if self.selection.contains(&parent_id) || targets.contains(&parent_id) {
                    continue;
                }
                targets.push(parent_id);
            } else if !targets.contains(id) {
                targets.push(id.clone());
            }
        }
        if targets.is_empty() {
            return;
        }

        let mut items = Vec::new();
        for id in targets {
            if id == self.document.root_id() {
                warn!("cannot copy element {}: it is the root container", id);
                continue;
            }
            let Some(element) = self.document.find_element(&id) else {
                continue;
            };
            // freeze interactivity so the clone sees a stable element
            self.stage.set_editable(&id, false);
            items.push(copy_subtree(&self.document.styles, element));
            self.stage.set_editable(&id, true);
        }

        if !items.is_empty() {
            debug!("copied {} element(s)", items.len());
            self.clipboard.replace(items);
            self.paste_count = 0;
        }
    }

    /// Materialize the clipboard into the document.
    ///
    /// Each buffered item becomes a fresh subtree appended to the root,
    /// dropped at the default viewport-relative location with a running
    /// offset. The new elements replace the selection. Empty clipboard is
    /// a no-op.
    pub fn paste(&mut self) -> Result<(), EditError> {
        if self.clipboard.is_empty() {
            return Ok(());
        }
        self.history.checkpoint(&self.document);
        let _op = self.history.begin_operation();

        let items: Vec<ClipboardItem> = self.clipboard.items().to_vec();
        let root_id = self.document.root_id().to_string();
        let mut selection = Vec::new();
        // each paste of the same buffer starts one step further down-right
        let mut offset = f64::from(self.paste_count) * PASTE_OFFSET_STEP;
        self.paste_count += 1;

        for item in &items {
            let element = self.materialize(item)?;
            let id = element.id.clone();
            self.document.append_element(&root_id, element)?;
            self.place_at_drop_position(&id, offset);
            self.stage.set_editable(&id, true);
            selection.push(id);
            offset += PASTE_OFFSET_STEP;
        }

        debug!("pasted {} element(s)", selection.len());
        self.set_selection(selection);
        Ok(())
    }

    /// Remove the selected elements, after asking for confirmation.
    ///
    /// Returns whether anything was deleted. Declining the prompt leaves
    /// history and document untouched. The root container is logged and
    /// skipped.
    pub async fn delete_selection(&mut self) -> Result<bool, EditError> {
        if self.selection.is_empty() {
            return Ok(false);
        }
        let accepted = self
            .notifier
            .confirm("About to delete the selected element(s). Are you sure?")
            .await;
        if !accepted {
            return Ok(false);
        }

        self.history.checkpoint(&self.document);
        let _op = self.history.begin_operation();

        let targets = std::mem::take(&mut self.selection);
        for id in targets {
            if id == self.document.root_id() {
                warn!("cannot delete element {}: it is the root container", id);
                continue;
            }
            if let Err(err) = self.document.remove_element(&id) {
                warn!("could not delete element {}: {}", id, err);
            }
        }
        Ok(true)
    }

    /// Reposition the selected elements in sibling order.
    ///
    /// Empty selection is a no-op (no checkpoint taken).
    pub fn move_selection(&mut self, direction: MoveDirection) {
        if self.selection.is_empty() {
            return;
        }
        self.history.checkpoint(&self.document);
        let _op = self.history.begin_operation();
        move_elements(&mut self.document, &self.selection, direction);
    }

    pub fn move_up(&mut self) {
        self.move_selection(MoveDirection::Up);
    }

    pub fn move_down(&mut self) {
        self.move_selection(MoveDirection::Down);
    }

    pub fn move_to_top(&mut self) {
        self.move_selection(MoveDirection::Top);
    }

    pub fn move_to_bottom(&mut self) {
        self.move_selection(MoveDirection::Bottom);
    }

    /// Resolve the edit surface for an element (explicit id, or the first
    /// selected element) and checkpoint for the edit that follows.
    ///
    /// Returns `None` without checkpointing when there is nothing to edit
    /// or the kind has no editor surface.
    pub fn edit_element(&mut self, element_id: Option<&str>) -> Option<EditIntent> {
        let id = match element_id {
            Some(id) => id.to_string(),
            None => self.selection.first()?.clone(),
        };
        let element = self.document.find_element(&id)?;
        let content = element.content.clone().unwrap_or_default();

        let intent = match element.kind {
            ElementKind::Component => EditIntent::ComponentParams { element_id: id },
            ElementKind::Text => EditIntent::EditText {
                element_id: id,
                content,
            },
            ElementKind::Html => EditIntent::EditHtml {
                element_id: id,
                content,
            },
            ElementKind::Image => EditIntent::PickImage { element_id: id },
            ElementKind::Container | ElementKind::Other => return None,
        };

        self.history.checkpoint(&self.document);
        Some(intent)
    }

    /// Replace an element's inline content. Covered by the checkpoint the
    /// opening [`EditSession::edit_element`] took.
    pub fn set_element_content(
        &mut self,
        element_id: &str,
        content: String,
    ) -> Result<(), EditError> {
        let _op = self.history.begin_operation();
        let element = self
            .document
            .find_element_mut(element_id)
            .ok_or_else(|| DocumentError::ElementNotFound(element_id.to_string()))?;
        element.content = Some(content);
        Ok(())
    }

    /// Deliver the outcome of the image pick started by
    /// [`EditSession::edit_element`].
    ///
    /// A failed load is surfaced through the notifier; the checkpoint
    /// taken when the picker opened stays valid and history is untouched.
    pub fn complete_image_edit(
        &mut self,
        element_id: &str,
        result: Result<String, String>,
    ) -> Result<(), EditError> {
        match result {
            Ok(source) => self.set_element_content(element_id, source),
            Err(message) => {
                self.notifier
                    .notify_error(&format!("Error: could not load the image. {}", message));
                Ok(())
            }
        }
    }

    fn materialize(&mut self, item: &ClipboardItem) -> Result<Element, EditError> {
        let mut element = item.element.clone();
        // ids captured at copy time are never reused; the whole clone gets
        // fresh ones, inline content included
        reassign_ids(&mut element, &mut self.ids);

        if element.component_data.is_some() {
            self.renderer.render(&mut element, &mut self.ids)?;
        }

        self.document
            .styles
            .set_style(&element.id, item.style.clone(), StyleViewport::Desktop);
        self.document
            .styles
            .set_style(&element.id, item.mobile_style.clone(), StyleViewport::Mobile);

        for child_item in &item.children {
            let child = self.materialize(child_item)?;
            element.children.push(child);
        }
        Ok(element)
    }

    fn place_at_drop_position(&mut self, element_id: &str, offset: f64) {
        let mut style = self
            .document
            .styles
            .capture(element_id, StyleViewport::Desktop);
        style.set(
            "left",
            format!("{}px", self.viewport.scroll_x + PASTE_DROP_X + offset),
        );
        style.set(
            "top",
            format!("{}px", self.viewport.scroll_y + PASTE_DROP_Y + offset),
        );
        self.document
            .styles
            .set_style(element_id, style, StyleViewport::Desktop);
    }
}

fn reassign_ids(element: &mut Element, ids: &mut IdGenerator) {
    element.id = ids.next_id();
    for child in &mut element.children {
        reassign_ids(child, ids);
    }
}
