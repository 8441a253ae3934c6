//! Point-in-time view of the knowledge base

use crate::types::{KnowledgeEntry, Label};
use std::collections::HashMap;

/// Immutable surface-text → label mapping read once per annotation run.
///
/// Keeps the order in which entries were supplied so that equal-length keys
/// are scanned in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeSnapshot {
    entries: Vec<(String, Label)>,
    index: HashMap<String, usize>,
}

impl KnowledgeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(text, label)` pairs. Empty texts are dropped and the
    /// first label seen for a text wins.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Label)>,
        S: Into<String>,
    {
        let mut snapshot = Self::new();
        for (text, label) in pairs {
            let text = text.into();
            if text.is_empty() || snapshot.index.contains_key(&text) {
                continue;
            }
            snapshot.index.insert(text.clone(), snapshot.entries.len());
            snapshot.entries.push((text, label));
        }
        snapshot
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a KnowledgeEntry>) -> Self {
        Self::from_pairs(entries.into_iter().map(|e| (e.text.clone(), e.label)))
    }

    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    pub fn label(&self, text: &str) -> Option<Label> {
        self.index.get(text).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Label)> {
        self.entries.iter().map(|(t, l)| (t.as_str(), *l))
    }

    /// Entries ordered longest key first (by char count), ties in
    /// first-encountered order
    pub fn longest_first(&self) -> Vec<(&str, Label)> {
        let mut ordered: Vec<(&str, Label)> = self.iter().collect();
        ordered.sort_by_key(|(text, _)| std::cmp::Reverse(text.chars().count()));
        ordered
    }
}
