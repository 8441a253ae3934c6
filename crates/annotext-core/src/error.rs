//! Error types for annotext

use crate::types::{AnnotationId, DocumentId};

/// Result type alias using annotext's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for annotext operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The addressed document does not exist
    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),

    /// The addressed annotation does not exist
    #[error("annotation {0} not found")]
    AnnotationNotFound(AnnotationId),

    /// No knowledge entry with this surface text
    #[error("knowledge entry '{0}' not found")]
    KnowledgeEntryNotFound(String),

    /// Caller supplied an unusable value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Classifier or scorer errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Storage collaborator errors
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error reports a missing document, annotation, or entry.
    ///
    /// These are the only failures the annotation pipeline surfaces to its
    /// caller; everything else in a run degrades in place.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound(_) | Self::AnnotationNotFound(_) | Self::KnowledgeEntryNotFound(_)
        )
    }
}
