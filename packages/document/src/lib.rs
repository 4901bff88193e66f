//! # Pagecraft Document
//!
//! In-memory model of a visual document: the element tree, the per-element
//! style sheet, and identifier allocation.
//!
//! This crate holds no editing policy. Structural operations (find, insert,
//! remove, reorder siblings) are primitives; checkpointing, clipboard
//! semantics, and command orchestration live in `pagecraft-editor`.

mod document;
mod element;
mod errors;
mod id_generator;
mod styles;

pub use document::Document;
pub use element::{Element, ElementKind, PositionMode};
pub use errors::DocumentError;
pub use id_generator::{document_seed, IdGenerator};
pub use styles::{StyleRecord, StyleSheet, StyleViewport};
