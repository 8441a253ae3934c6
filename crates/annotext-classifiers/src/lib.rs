//! annotext Classifiers
//!
//! Candidate-producing classifiers for the annotation engine.
//!
//! Span sources, in the priority order the merger consumes them:
//! - Knowledge-base exact matching, longest key first
//! - Part-of-speech heuristics with token-level sentiment
//! - Regex date/time patterns
//!
//! Also provided: whole-document category/sentiment, a lexicon sentiment
//! scorer, and a dictionary tokenizer for use when no external NLP service
//! is wired in.

pub mod classifier;
pub mod config;
pub mod document;
pub mod heuristic;
pub mod knowledge;
pub mod lexicon;
pub mod sentiment;
pub mod temporal;

pub use classifier::{checked_score, Candidate, CandidateSource, ConstantScorer, SentimentScorer};
pub use config::{AnnotatorConfig, CategoryBucket, SentimentConfig, TemporalConfig};
pub use document::DocumentClassifier;
pub use heuristic::HeuristicClassifier;
pub use knowledge::KnowledgeMatcher;
pub use lexicon::LexiconTokenizer;
pub use sentiment::LexiconScorer;
pub use temporal::TemporalMatcher;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Candidate, CandidateSource, SentimentScorer};
    pub use crate::config::AnnotatorConfig;
    pub use crate::document::DocumentClassifier;
    pub use crate::heuristic::HeuristicClassifier;
    pub use crate::knowledge::KnowledgeMatcher;
    pub use crate::lexicon::LexiconTokenizer;
    pub use crate::sentiment::LexiconScorer;
    pub use crate::temporal::TemporalMatcher;
}
