//! Scorer trait and candidate span types

use annotext_core::{Error, Result, Span};
use std::fmt;
use tracing::{debug, warn};

/// External sentiment scorer collaborator.
///
/// Maps a text to a positivity score in `[0, 1]`. Implementations may fail on
/// degenerate input; callers treat any failure as "no opinion".
pub trait SentimentScorer: Send + Sync {
    /// Score the given text
    fn score(&self, text: &str) -> Result<f32>;

    /// Get the scorer name
    fn name(&self) -> &str;
}

/// Score `text`, turning a failed call or an unusable value into `None`
pub fn checked_score(scorer: &dyn SentimentScorer, text: &str) -> Option<f32> {
    match scorer.score(text) {
        Ok(score) if score.is_finite() && (0.0..=1.0).contains(&score) => Some(score),
        Ok(score) => {
            warn!(scorer = scorer.name(), score, "scorer returned out-of-range value");
            None
        }
        Err(e) => {
            debug!(scorer = scorer.name(), error = %e, "scorer failed");
            None
        }
    }
}

/// Which source proposed a candidate span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Exact match against the knowledge base
    Knowledge,
    /// Part-of-speech and sentiment heuristics on a token
    Heuristic,
    /// Date/time regular expressions
    Temporal,
}

impl CandidateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Heuristic => "heuristic",
            Self::Temporal => "temporal",
        }
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed span, not yet checked against committed spans
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub span: Span,

    /// Covered text
    pub text: String,

    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(span: Span, text: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            span,
            text: text.into(),
            source,
        }
    }
}

/// Scorer that always returns the same value
#[derive(Debug, Clone)]
pub struct ConstantScorer {
    score: f32,
}

impl ConstantScorer {
    pub fn new(score: f32) -> Self {
        Self { score }
    }

    /// Neutral scorer, useful when no sentiment model is available
    pub fn neutral() -> Self {
        Self::new(0.5)
    }
}

impl SentimentScorer for ConstantScorer {
    fn score(&self, text: &str) -> Result<f32> {
        if text.trim().is_empty() {
            return Err(Error::classifier("cannot score empty text"));
        }
        Ok(self.score)
    }

    fn name(&self) -> &str {
        "constant"
    }
}
