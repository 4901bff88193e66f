use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structural kind of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Structural container holding child elements
    Container,

    /// Text block
    Text,

    /// Raw html block
    Html,

    /// Image
    Image,

    /// Component instance carrying an opaque payload
    Component,

    /// Markup the editor does not manage individually (copied verbatim,
    /// never selected or reordered on its own)
    Other,
}

impl ElementKind {
    /// Whether the editor manages elements of this kind individually.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ElementKind::Other)
    }
}

/// How an element participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PositionMode {
    /// Explicit coordinates; sibling order acts as a z-order
    #[default]
    Absolute,

    /// Normal document flow; sibling order reads top to bottom
    Flow,
}

/// A node in the document tree.
///
/// The tree exclusively owns every element reachable from its root; an
/// element is never shared across two parents. `children` is only
/// meaningful for containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique within the document
    pub id: String,

    pub kind: ElementKind,

    #[serde(default)]
    pub position: PositionMode,

    /// Structural wrapper whose semantic unit for selection is its parent
    #[serde(default)]
    pub section_content: bool,

    /// Inline payload: text body, raw html, or image source
    #[serde(default)]
    pub content: Option<String>,

    /// Opaque component state blob
    #[serde(default)]
    pub component_data: Option<Value>,

    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: PositionMode::default(),
            section_content: false,
            content: None,
            component_data: None,
            children: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: PositionMode) -> Self {
        self.position = position;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_component_data(mut self, data: Value) -> Self {
        self.component_data = Some(data);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn as_section_content(mut self) -> Self {
        self.section_content = true;
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind == ElementKind::Container
    }

    /// Depth-first visit of this element and every descendant.
    pub fn walk(&self, visit: &mut impl FnMut(&Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Ids of this element and every descendant, in depth-first order.
    pub fn subtree_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.walk(&mut |element| ids.push(element.id.clone()));
        ids
    }
}
