//! annotext Engine
//!
//! Combines knowledge-base matches, part-of-speech heuristics, and temporal
//! patterns into one non-overlapping annotation set per document, and feeds
//! manual labels back into the knowledge base.
//!
//! The [`AnnotationService`] is the entry point:
//! - `auto_annotate` runs the pipeline and replaces a document's annotations
//! - `save_annotation` records a manual label and promotes it
//! - knowledge-base listing, export, and import

pub mod feedback;
pub mod merger;
pub mod pipeline;
pub mod segments;
pub mod service;

pub use feedback::promote;
pub use merger::{IntervalIndex, SpanMerger};
pub use pipeline::AnnotationPipeline;
pub use segments::Segment;
pub use service::AnnotationService;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::pipeline::AnnotationPipeline;
    pub use crate::service::AnnotationService;
    pub use annotext_core::prelude::*;
}
