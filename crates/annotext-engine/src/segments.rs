//! Token-indexed view of a document
//!
//! Derived from the token stream and the stored spans on every call; nothing
//! here is persisted.

use annotext_core::{AnnotationRecord, Label, TokenStream};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub index: usize,
    pub text: String,

    /// Tokenizer flag, e.g. `nr`
    pub tag: String,

    /// Display name of the part of speech
    pub pos_name: &'static str,

    /// Style class for rendering
    pub style: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<(usize, usize)>,

    /// Label of the annotation covering this token, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
}

/// Build the view. `annotations` must be sorted by start and disjoint, as
/// stored annotation sets are.
pub fn segments(stream: &TokenStream, annotations: &[AnnotationRecord]) -> Vec<Segment> {
    stream
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let (pos_name, style) = token.tag.display();
            Segment {
                index,
                text: token.text.clone(),
                tag: token.tag.flag().to_string(),
                pos_name,
                style,
                span: token.span,
                label: token.span.and_then(|(s, e)| covering_label(annotations, s, e)),
            }
        })
        .collect()
}

fn covering_label(annotations: &[AnnotationRecord], start: usize, end: usize) -> Option<Label> {
    let i = annotations.partition_point(|a| a.end <= start);
    annotations
        .get(i)
        .filter(|a| a.start < end)
        .map(|a| a.label)
}
