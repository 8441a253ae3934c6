//! Lightweight sentiment scorer
//!
//! This is a lexicon-based scorer used when no external model is wired in.

use crate::classifier::SentimentScorer;
use aho_corasick::{AhoCorasick, MatchKind};
use annotext_core::{Error, Result};

const POSITIVE: &[&str] = &[
    "好", "很好", "美好", "美丽", "优秀", "开心", "高兴", "快乐", "幸福", "喜欢", "满意",
    "精彩", "成功", "漂亮", "温暖", "舒服", "棒", "赞", "good", "great", "excellent", "love",
    "amazing", "wonderful", "happy", "fantastic", "awesome", "best",
];

const NEGATIVE: &[&str] = &[
    "坏", "差", "不好", "糟糕", "难过", "失望", "讨厌", "痛苦", "愤怒", "伤心", "失败",
    "可怕", "难受", "烦", "恶劣", "bad", "terrible", "awful", "hate", "horrible", "worst",
    "sad", "angry", "disappointed", "poor",
];

pub struct LexiconScorer {
    name: String,
    matcher: AhoCorasick,
    positive_count: usize,
}

impl LexiconScorer {
    pub fn new() -> Result<Self> {
        Self::with_words("sentiment-lexicon", POSITIVE, NEGATIVE)
    }

    /// Build from custom word lists.
    ///
    /// Both lists share one leftmost-longest automaton so a negated phrase
    /// such as "不好" is counted once as negative rather than also matching
    /// the positive "好" inside it.
    pub fn with_words(
        name: impl Into<String>,
        positive: &[&str],
        negative: &[&str],
    ) -> Result<Self> {
        let patterns: Vec<&str> = positive.iter().chain(negative.iter()).copied().collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| Error::classifier(format!("Failed to build sentiment matcher: {e}")))?;

        Ok(Self {
            name: name.into(),
            matcher,
            positive_count: positive.len(),
        })
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f32> {
        if text.trim().is_empty() {
            return Err(Error::classifier("cannot score empty text"));
        }

        let (mut positive_hits, mut negative_hits) = (0.0f32, 0.0f32);
        for m in self.matcher.find_iter(text) {
            if m.pattern().as_usize() < self.positive_count {
                positive_hits += 1.0;
            } else {
                negative_hits += 1.0;
            }
        }

        let total = positive_hits + negative_hits;
        Ok(if total == 0.0 {
            0.5
        } else {
            positive_hits / total
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
