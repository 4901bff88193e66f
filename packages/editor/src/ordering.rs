//! # Element Ordering
//!
//! Sibling-order repositioning that reconciles logical move intent with
//! each element's positioning mode.
//!
//! Absolute elements stack by sibling order, so the requested direction
//! applies as-is. Flow elements read top to bottom, which reverses the
//! visual meaning of sibling order, so the direction flips.

use pagecraft_document::{Document, PositionMode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Logical move intent for a reorder command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Up,
    Down,
    Top,
    Bottom,
}

impl MoveDirection {
    /// Mirror the direction: Up <-> Down, Top <-> Bottom.
    pub fn inverted(self) -> Self {
        match self {
            MoveDirection::Up => MoveDirection::Down,
            MoveDirection::Down => MoveDirection::Up,
            MoveDirection::Top => MoveDirection::Bottom,
            MoveDirection::Bottom => MoveDirection::Top,
        }
    }
}

/// How a positioning mode maps logical directions onto sibling-order
/// moves. Resolved once per element at the start of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackingMode {
    /// Explicit coordinates; sibling order is a z-order
    Stacked,

    /// Document flow; directions flip
    Flowed,
}

impl StackingMode {
    pub fn of(position: PositionMode) -> Self {
        match position {
            PositionMode::Absolute => StackingMode::Stacked,
            PositionMode::Flow => StackingMode::Flowed,
        }
    }

    /// The structural direction to actually apply.
    pub fn resolve(self, direction: MoveDirection) -> MoveDirection {
        match self {
            StackingMode::Stacked => direction,
            StackingMode::Flowed => direction.inverted(),
        }
    }
}

/// Apply `direction` to every element of `selection`.
///
/// Elements are processed in ascending sibling order; the inversion is
/// computed independently per element, so a mixed selection of absolute
/// and flow elements may have members moved in opposite structural
/// directions for the same logical command. Up/Down at the first/last
/// position are no-ops.
pub fn move_elements(document: &mut Document, selection: &[String], direction: MoveDirection) {
    let mut ordered: Vec<(usize, &String)> = selection
        .iter()
        .filter_map(|id| match document.sibling_index(id) {
            Some(index) => Some((index, id)),
            None => {
                warn!("cannot move element {}: it has no siblings", id);
                None
            }
        })
        .collect();
    ordered.sort_by_key(|(index, _)| *index);

    for (_, id) in ordered {
        let Some(element) = document.find_element(id) else {
            continue;
        };
        let resolved = StackingMode::of(element.position).resolve(direction);

        let outcome = match resolved {
            MoveDirection::Up => document.swap_with_previous(id).map(|_| ()),
            MoveDirection::Down => document.swap_with_next(id).map(|_| ()),
            MoveDirection::Top => document.move_to_first(id),
            MoveDirection::Bottom => document.move_to_last(id),
        };
        if let Err(err) = outcome {
            warn!("could not move element {}: {}", id, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{Element, ElementKind};

    fn row(position: PositionMode) -> Document {
        let root = Element::new("root", ElementKind::Container).with_children(vec![
            Element::new("a", ElementKind::Text).with_position(position),
            Element::new("b", ElementKind::Text).with_position(position),
            Element::new("c", ElementKind::Text).with_position(position),
        ]);
        Document::new(root).unwrap()
    }

    fn order(document: &Document) -> Vec<String> {
        document.root.children.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_inversion_is_an_involution() {
        for direction in [
            MoveDirection::Up,
            MoveDirection::Down,
            MoveDirection::Top,
            MoveDirection::Bottom,
        ] {
            assert_eq!(direction.inverted().inverted(), direction);
        }
    }

    #[test]
    fn test_stacked_applies_direction_as_is() {
        let mut document = row(PositionMode::Absolute);
        move_elements(&mut document, &["b".into()], MoveDirection::Up);
        assert_eq!(order(&document), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_flowed_inverts_direction() {
        let mut document = row(PositionMode::Flow);
        move_elements(&mut document, &["b".into()], MoveDirection::Up);
        assert_eq!(order(&document), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_edge_moves_are_noops() {
        let mut document = row(PositionMode::Absolute);
        move_elements(&mut document, &["a".into()], MoveDirection::Up);
        assert_eq!(order(&document), vec!["a", "b", "c"]);

        move_elements(&mut document, &["c".into()], MoveDirection::Down);
        assert_eq!(order(&document), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mixed_selection_moves_independently() {
        let root = Element::new("root", ElementKind::Container).with_children(vec![
            Element::new("a", ElementKind::Text).with_position(PositionMode::Absolute),
            Element::new("b", ElementKind::Text).with_position(PositionMode::Flow),
            Element::new("c", ElementKind::Text).with_position(PositionMode::Absolute),
            Element::new("d", ElementKind::Text).with_position(PositionMode::Absolute),
        ]);
        let mut document = Document::new(root).unwrap();

        // b is Flow: Up inverts to Down (swaps with c); d is Absolute:
        // Up swaps with its previous sibling
        move_elements(
            &mut document,
            &["b".into(), "d".into()],
            MoveDirection::Up,
        );
        assert_eq!(order(&document), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_selection_processed_in_sibling_order() {
        let mut document = row(PositionMode::Absolute);
        // given out of order; both move up one slot
        move_elements(
            &mut document,
            &["c".into(), "b".into()],
            MoveDirection::Up,
        );
        assert_eq!(order(&document), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_unknown_id_is_skipped() {
        let mut document = row(PositionMode::Absolute);
        move_elements(
            &mut document,
            &["ghost".into(), "b".into()],
            MoveDirection::Top,
        );
        assert_eq!(order(&document), vec!["b", "a", "c"]);
    }
}
