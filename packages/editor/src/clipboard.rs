//! # Clipboard
//!
//! Deep, style-preserving duplication of element subtrees.
//!
//! ## Copy model
//!
//! A clipboard item pairs a detached structural clone with the style
//! records captured for it. Recognized children of a container are
//! represented only as nested items; the clone itself retains just the
//! unrecognized inline content. The item tree is built bottom-up from an
//! unmodified read of the live tree - no clone is mutated mid-traversal.

use pagecraft_document::{Element, StyleRecord, StyleSheet, StyleViewport};
use serde::{Deserialize, Serialize};

/// A detached structural clone plus its captured style records,
/// recursively holding items for recognized structural children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardItem {
    /// Clone of the source element; recognized children stripped,
    /// unrecognized inline content kept verbatim
    pub element: Element,

    pub style: StyleRecord,

    pub mobile_style: StyleRecord,

    /// Mirrors the recognized structural children of the source, in order
    pub children: Vec<ClipboardItem>,
}

/// Copy an element and its recognized descendants into a clipboard item.
///
/// Desktop and mobile style records are captured together for every item.
pub fn copy_subtree(styles: &StyleSheet, element: &Element) -> ClipboardItem {
    let mut clone = element.clone();
    let mut children = Vec::new();

    if element.is_container() {
        clone.children = element
            .children
            .iter()
            .filter(|child| !child.kind.is_recognized())
            .cloned()
            .collect();
        children = element
            .children
            .iter()
            .filter(|child| child.kind.is_recognized())
            .map(|child| copy_subtree(styles, child))
            .collect();
    }

    ClipboardItem {
        element: clone,
        style: styles.capture(&element.id, StyleViewport::Desktop),
        mobile_style: styles.capture(&element.id, StyleViewport::Mobile),
        children,
    }
}

/// Single buffer slot for copied subtrees.
///
/// Overwritten wholesale on every copy, read non-destructively on every
/// paste, persists across pastes until the next copy.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    items: Vec<ClipboardItem>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Wholesale replace; a copy never appends to an older buffer.
    pub fn replace(&mut self, items: Vec<ClipboardItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{Document, ElementKind};

    fn styled_document() -> Document {
        let root = Element::new("root", ElementKind::Container).with_children(vec![
            Element::new("section", ElementKind::Container).with_children(vec![
                Element::new("heading", ElementKind::Text).with_content("Welcome"),
                Element::new("decoration", ElementKind::Other).with_content("<hr>"),
                Element::new("photo", ElementKind::Image).with_content("hero.png"),
            ]),
        ]);
        let mut document = Document::new(root).unwrap();

        let mut desktop = StyleRecord::new();
        desktop.set("width", "960px");
        document
            .styles
            .set_style("section", desktop, StyleViewport::Desktop);
        let mut mobile = StyleRecord::new();
        mobile.set("width", "100%");
        document
            .styles
            .set_style("section", mobile, StyleViewport::Mobile);

        document
    }

    #[test]
    fn test_container_children_become_items() {
        let document = styled_document();
        let section = document.find_element("section").unwrap();

        let item = copy_subtree(&document.styles, section);

        // recognized children live only in `children`; the unrecognized
        // decoration stays inline in the clone
        assert_eq!(item.children.len(), 2);
        assert_eq!(item.children[0].element.id, "heading");
        assert_eq!(item.children[1].element.id, "photo");
        assert_eq!(item.element.children.len(), 1);
        assert_eq!(item.element.children[0].id, "decoration");
    }

    #[test]
    fn test_both_style_variants_captured() {
        let document = styled_document();
        let section = document.find_element("section").unwrap();

        let item = copy_subtree(&document.styles, section);

        assert_eq!(item.style.get("width"), Some("960px"));
        assert_eq!(item.mobile_style.get("width"), Some("100%"));
    }

    #[test]
    fn test_non_container_keeps_content_inline() {
        let document = styled_document();
        let heading = document.find_element("heading").unwrap();

        let item = copy_subtree(&document.styles, heading);

        assert!(item.children.is_empty());
        assert_eq!(item.element.content.as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_copy_does_not_touch_the_source() {
        let document = styled_document();
        let reference = document.clone();

        let section = document.find_element("section").unwrap();
        let _ = copy_subtree(&document.styles, section);

        assert_eq!(document, reference);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let document = styled_document();
        let section = document.find_element("section").unwrap();
        let heading = document.find_element("heading").unwrap();

        let mut clipboard = Clipboard::new();
        clipboard.replace(vec![
            copy_subtree(&document.styles, section),
            copy_subtree(&document.styles, heading),
        ]);
        assert_eq!(clipboard.len(), 2);

        clipboard.replace(vec![copy_subtree(&document.styles, heading)]);
        assert_eq!(clipboard.len(), 1);
        assert_eq!(clipboard.items()[0].element.id, "heading");
    }

    #[test]
    fn test_clipboard_item_serialization_round_trip() {
        let document = styled_document();
        let section = document.find_element("section").unwrap();
        let item = copy_subtree(&document.styles, section);

        let json = serde_json::to_string(&item).unwrap();
        let deserialized: ClipboardItem = serde_json::from_str(&json).unwrap();

        assert_eq!(item, deserialized);
    }
}
