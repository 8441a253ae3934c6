//! Annotation statistics

use annotext_core::{Annotation, Label};
use serde::Serialize;

/// Count for one label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: Label,
    pub count: usize,
}

/// Store-wide annotation statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationStats {
    pub total_documents: usize,
    pub total_annotations: usize,

    /// One entry per counted label, zero-filled, in [`Label::COUNTED`] order
    pub label_counts: Vec<LabelCount>,

    /// Annotations per document, rounded half to even
    pub average_per_document: u64,
}

impl AnnotationStats {
    pub fn collect(total_documents: usize, annotations: &[Annotation]) -> Self {
        let label_counts = Label::COUNTED
            .iter()
            .map(|&label| LabelCount {
                label,
                count: annotations
                    .iter()
                    .filter(|a| a.record.label == label)
                    .count(),
            })
            .collect();

        let average_per_document = rounded_average(annotations.len(), total_documents);

        Self {
            total_documents,
            total_annotations: annotations.len(),
            label_counts,
            average_per_document,
        }
    }

    pub fn count(&self, label: Label) -> usize {
        self.label_counts
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

/// `total / count` rounded to the nearest integer, ties to even
fn rounded_average(total: usize, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let (quotient, remainder) = (total / count, total % count);
    let rounded = match (2 * remainder).cmp(&count) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + quotient % 2,
    };
    rounded as u64
}
