//! annotext Core
//!
//! Core types, traits, and utilities shared across annotext components.
//!
//! This crate provides:
//! - The document, span, annotation, and knowledge-base data model
//! - Error types and result handling
//! - The tokenizer collaborator trait and token stream alignment
//! - Char/byte offset translation for span arithmetic

pub mod error;
pub mod knowledge;
pub mod stream;
pub mod tag;
pub mod types;

pub use error::{Error, Result};
pub use knowledge::KnowledgeSnapshot;
pub use stream::{RawToken, TextIndex, Token, TokenStream, Tokenizer};
pub use tag::PosTag;
pub use types::{
    Annotation, AnnotationId, AnnotationRecord, AnnotationSet, Document, DocumentAnnotation,
    DocumentId, DocumentStatus, KnowledgeEntry, KnowledgeSource, Label, SentimentBucket, Span,
    TagType,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::knowledge::KnowledgeSnapshot;
    pub use crate::stream::{Token, TokenStream, Tokenizer};
    pub use crate::tag::PosTag;
    pub use crate::types::{AnnotationRecord, AnnotationSet, Label, Span, TagType};
}
