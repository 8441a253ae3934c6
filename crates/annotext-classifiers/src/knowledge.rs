//! Knowledge-base exact-match classifier

use crate::classifier::{Candidate, CandidateSource};
use annotext_core::{KnowledgeSnapshot, Span, TextIndex};

/// Exact substring matcher over a knowledge-base snapshot.
///
/// Keys are scanned longest first so that a longer known phrase is proposed
/// before any shorter key it contains. Occurrences of one key never overlap
/// each other; overlaps between different keys are left to the merger.
#[derive(Debug, Default, Clone, Copy)]
pub struct KnowledgeMatcher;

impl KnowledgeMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Propose every occurrence of every known key
    pub fn candidates(&self, text: &str, snapshot: &KnowledgeSnapshot) -> Vec<Candidate> {
        if text.is_empty() || snapshot.is_empty() {
            return Vec::new();
        }

        let index = TextIndex::new(text);
        let mut candidates = Vec::new();

        for (key, label) in snapshot.longest_first() {
            for (byte_start, matched) in text.match_indices(key) {
                let (start, end) = index.char_range(byte_start, byte_start + matched.len());
                candidates.push(Candidate::new(
                    Span::new(start, end, label),
                    matched,
                    CandidateSource::Knowledge,
                ));
            }
        }

        candidates
    }
}
