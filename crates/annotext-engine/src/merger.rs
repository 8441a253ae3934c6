//! Span merging
//!
//! Candidates are offered source by source in priority order. A candidate is
//! committed only if none of its characters is already claimed; committed
//! ranges live in a sorted list of disjoint intervals searched by bisection.

use annotext_classifiers::Candidate;
use annotext_core::AnnotationRecord;
use tracing::debug;

/// Sorted, pairwise disjoint half-open ranges
#[derive(Debug, Clone, Default)]
pub struct IntervalIndex {
    ranges: Vec<(usize, usize)>,
}

impl IntervalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `[start, end)` shares a position with any claimed range
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        // first range that ends after `start`
        let i = self.ranges.partition_point(|&(_, e)| e <= start);
        self.ranges.get(i).is_some_and(|&(s, _)| s < end)
    }

    /// Claim `[start, end)`. Returns `false` and leaves the index unchanged
    /// when the range is empty or overlaps.
    pub fn claim(&mut self, start: usize, end: usize) -> bool {
        if start >= end || self.overlaps(start, end) {
            return false;
        }
        let at = self.ranges.partition_point(|&(s, _)| s < start);
        self.ranges.insert(at, (start, end));
        true
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }
}

/// Accumulates committed spans for one document
#[derive(Debug, Default)]
pub struct SpanMerger {
    index: IntervalIndex,
    committed: Vec<AnnotationRecord>,
    rejected: usize,
}

impl SpanMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one candidate; returns whether it was committed
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        let span = candidate.span;
        let source = candidate.source.as_str();

        if !self.index.claim(span.start, span.end) {
            debug!(
                source,
                start = span.start,
                end = span.end,
                text = %candidate.text,
                "candidate rejected"
            );
            metrics::counter!("annotext_candidates_total", "source" => source, "outcome" => "rejected")
                .increment(1);
            self.rejected += 1;
            return false;
        }

        debug!(
            source,
            start = span.start,
            end = span.end,
            label = %span.label,
            "candidate committed"
        );
        metrics::counter!("annotext_candidates_total", "source" => source, "outcome" => "committed")
            .increment(1);
        self.committed
            .push(AnnotationRecord::from_span(&span, candidate.text));
        true
    }

    /// Offer a whole source in its own order
    pub fn offer_all(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> usize {
        candidates
            .into_iter()
            .map(|c| self.offer(c))
            .filter(|&committed| committed)
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Committed spans ordered by start
    pub fn finish(mut self) -> Vec<AnnotationRecord> {
        self.committed.sort_by_key(|r| r.start);
        self.committed
    }
}
