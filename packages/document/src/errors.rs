//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("no parent found for element: {0}")]
    ParentNotFound(String),

    #[error("element {0} cannot hold children")]
    NotAContainer(String),

    #[error("the document root must be a container")]
    RootNotContainer,

    #[error("the root container cannot be detached")]
    CannotDetachRoot,

    #[error("duplicate element id: {0}")]
    DuplicateId(String),
}
