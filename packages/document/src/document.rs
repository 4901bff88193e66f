//! # Document Tree
//!
//! The live document: a root container plus the style sheet for every
//! element under it. Operations here are structural primitives; callers own
//! checkpointing and selection.

use crate::{DocumentError, Element, ElementKind, StyleSheet};
use serde::{Deserialize, Serialize};

/// Editable visual document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub root: Element,
    pub styles: StyleSheet,
}

impl Document {
    /// Create a document around `root`, which must be a container.
    pub fn new(root: Element) -> Result<Self, DocumentError> {
        if root.kind != ElementKind::Container {
            return Err(DocumentError::RootNotContainer);
        }
        Ok(Self {
            root,
            styles: StyleSheet::new(),
        })
    }

    pub fn root_id(&self) -> &str {
        &self.root.id
    }

    pub fn contains(&self, element_id: &str) -> bool {
        self.find_element(element_id).is_some()
    }

    pub fn find_element(&self, element_id: &str) -> Option<&Element> {
        find_in(&self.root, element_id)
    }

    pub fn find_element_mut(&mut self, element_id: &str) -> Option<&mut Element> {
        find_in_mut(&mut self.root, element_id)
    }

    /// Parent of the element, or `None` for the root and unknown ids.
    pub fn parent_of(&self, element_id: &str) -> Option<&Element> {
        find_parent(&self.root, element_id)
    }

    /// Position of the element among its structural siblings.
    pub fn sibling_index(&self, element_id: &str) -> Option<usize> {
        let parent = self.parent_of(element_id)?;
        parent.children.iter().position(|c| c.id == element_id)
    }

    /// Detach the element (and its subtree) from the tree and return it.
    /// Style records for the whole subtree are dropped with it.
    pub fn remove_element(&mut self, element_id: &str) -> Result<Element, DocumentError> {
        if element_id == self.root.id {
            return Err(DocumentError::CannotDetachRoot);
        }
        let removed = remove_from(&mut self.root, element_id)
            .ok_or_else(|| DocumentError::ElementNotFound(element_id.to_string()))?;
        for id in removed.subtree_ids() {
            self.styles.remove(&id);
        }
        Ok(removed)
    }

    /// Insert `element` as a child of `parent_id` at `index` (clamped).
    pub fn insert_element(
        &mut self,
        parent_id: &str,
        index: usize,
        element: Element,
    ) -> Result<(), DocumentError> {
        let parent = self
            .find_element_mut(parent_id)
            .ok_or_else(|| DocumentError::ParentNotFound(parent_id.to_string()))?;
        if parent.kind != ElementKind::Container {
            return Err(DocumentError::NotAContainer(parent_id.to_string()));
        }
        let index = index.min(parent.children.len());
        parent.children.insert(index, element);
        Ok(())
    }

    /// Insert `element` as the last child of `parent_id`.
    pub fn append_element(&mut self, parent_id: &str, element: Element) -> Result<(), DocumentError> {
        let parent = self
            .find_element_mut(parent_id)
            .ok_or_else(|| DocumentError::ParentNotFound(parent_id.to_string()))?;
        if parent.kind != ElementKind::Container {
            return Err(DocumentError::NotAContainer(parent_id.to_string()));
        }
        parent.children.push(element);
        Ok(())
    }

    /// Swap the element with its previous sibling. Returns `false` (no-op)
    /// if it is already first.
    pub fn swap_with_previous(&mut self, element_id: &str) -> Result<bool, DocumentError> {
        let (parent, index) = self.locate_mut(element_id)?;
        if index == 0 {
            return Ok(false);
        }
        parent.children.swap(index - 1, index);
        Ok(true)
    }

    /// Swap the element with its next sibling. Returns `false` (no-op) if
    /// it is already last.
    pub fn swap_with_next(&mut self, element_id: &str) -> Result<bool, DocumentError> {
        let (parent, index) = self.locate_mut(element_id)?;
        if index + 1 >= parent.children.len() {
            return Ok(false);
        }
        parent.children.swap(index, index + 1);
        Ok(true)
    }

    /// Move the element to the first sibling position.
    pub fn move_to_first(&mut self, element_id: &str) -> Result<(), DocumentError> {
        let (parent, index) = self.locate_mut(element_id)?;
        let element = parent.children.remove(index);
        parent.children.insert(0, element);
        Ok(())
    }

    /// Move the element to the last sibling position.
    pub fn move_to_last(&mut self, element_id: &str) -> Result<(), DocumentError> {
        let (parent, index) = self.locate_mut(element_id)?;
        let element = parent.children.remove(index);
        parent.children.push(element);
        Ok(())
    }

    /// Every id in the tree is unique.
    pub fn validate_unique_ids(&self) -> Result<(), DocumentError> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicate = None;
        self.root.walk(&mut |element| {
            if !seen.insert(element.id.clone()) && duplicate.is_none() {
                duplicate = Some(element.id.clone());
            }
        });
        match duplicate {
            Some(id) => Err(DocumentError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    fn locate_mut(&mut self, element_id: &str) -> Result<(&mut Element, usize), DocumentError> {
        let parent = find_parent_mut(&mut self.root, element_id)
            .ok_or_else(|| DocumentError::ParentNotFound(element_id.to_string()))?;
        let index = parent
            .children
            .iter()
            .position(|c| c.id == element_id)
            .ok_or_else(|| DocumentError::ElementNotFound(element_id.to_string()))?;
        Ok((parent, index))
    }
}

fn find_in<'a>(element: &'a Element, id: &str) -> Option<&'a Element> {
    if element.id == id {
        return Some(element);
    }
    for child in &element.children {
        if let Some(found) = find_in(child, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(element: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if element.id == id {
        return Some(element);
    }
    for child in &mut element.children {
        if let Some(found) = find_in_mut(child, id) {
            return Some(found);
        }
    }
    None
}

fn find_parent<'a>(element: &'a Element, id: &str) -> Option<&'a Element> {
    if element.children.iter().any(|c| c.id == id) {
        return Some(element);
    }
    for child in &element.children {
        if let Some(found) = find_parent(child, id) {
            return Some(found);
        }
    }
    None
}

fn find_parent_mut<'a>(element: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if element.children.iter().any(|c| c.id == id) {
        return Some(element);
    }
    for child in &mut element.children {
        if let Some(found) = find_parent_mut(child, id) {
            return Some(found);
        }
    }
    None
}

fn remove_from(element: &mut Element, id: &str) -> Option<Element> {
    if let Some(position) = element.children.iter().position(|c| c.id == id) {
        return Some(element.children.remove(position));
    }
    for child in &mut element.children {
        if let Some(removed) = remove_from(child, id) {
            return Some(removed);
        }
    }
    None
}
