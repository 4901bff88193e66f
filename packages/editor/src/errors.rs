//! Error types for the editing core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("document error: {0}")]
    Document(#[from] pagecraft_document::DocumentError),

    #[error("timed out waiting for pending operations to settle")]
    PendingTimeout,

    #[error("component render failed: {0}")]
    Render(String),
}
