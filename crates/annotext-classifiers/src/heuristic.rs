//! Part-of-speech and sentiment heuristics over aligned tokens

use crate::classifier::{checked_score, Candidate, CandidateSource, SentimentScorer};
use crate::config::SentimentConfig;
use annotext_core::{KnowledgeSnapshot, Label, PosTag, Span, TagType, Token, TokenStream};
use tracing::debug;

/// Assigns at most one label per token.
///
/// The entity rule maps proper-noun and time tags straight to labels. Only
/// when it does not fire are adjective/adverb tokens scored for sentiment.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    sentiment: SentimentConfig,
}

impl HeuristicClassifier {
    pub fn new(sentiment: SentimentConfig) -> Self {
        Self { sentiment }
    }

    /// Entity label implied by a tag
    pub fn entity_label(tag: &PosTag) -> Option<Label> {
        match tag {
            PosTag::PersonName => Some(Label::Person),
            PosTag::PlaceName => Some(Label::Place),
            PosTag::OrganizationName => Some(Label::Organization),
            PosTag::TimeWord => Some(Label::Time),
            _ => None,
        }
    }

    /// Classify one token.
    ///
    /// Tokens without a span and tokens whose text is a knowledge-base key are
    /// skipped; the knowledge matcher owns the latter.
    pub fn classify(
        &self,
        token: &Token,
        snapshot: &KnowledgeSnapshot,
        scorer: &dyn SentimentScorer,
    ) -> Option<Candidate> {
        let (start, end) = token.span?;
        if snapshot.contains(&token.text) {
            return None;
        }

        if let Some(label) = Self::entity_label(&token.tag) {
            return Some(Candidate::new(
                Span::new(start, end, label),
                token.text.clone(),
                CandidateSource::Heuristic,
            ));
        }

        if !token.tag.is_sentiment_bearing() || token.char_len() < self.sentiment.min_token_chars {
            return None;
        }

        let score = checked_score(scorer, &token.text)?;
        if !self.sentiment.is_polarized(score) {
            return None;
        }

        debug!(token = %token.text, score, "sentiment token");
        Some(Candidate::new(
            Span::with_tag_type(start, end, Label::Sentiment, TagType::Sentiment),
            token.text.clone(),
            CandidateSource::Heuristic,
        ))
    }

    /// Candidates for a whole stream, in token order
    pub fn candidates(
        &self,
        stream: &TokenStream,
        snapshot: &KnowledgeSnapshot,
        scorer: &dyn SentimentScorer,
    ) -> Vec<Candidate> {
        stream
            .iter()
            .filter_map(|token| self.classify(token, snapshot, scorer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ConstantScorer;
    use annotext_core::{Error, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingScorer {
        score: f32,
        calls: AtomicUsize,
    }

    impl SentimentScorer for CountingScorer {
        fn score(&self, _text: &str) -> Result<f32> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.score)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FailingScorer;

    impl SentimentScorer for FailingScorer {
        fn score(&self, _text: &str) -> Result<f32> {
            Err(Error::classifier("boom"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn token(text: &str, tag: &str, start: usize) -> Token {
        Token::new(text, PosTag::from(tag), Some((start, start + text.chars().count())))
    }

    #[test]
    fn test_entity_rule() {
        let classifier = HeuristicClassifier::default();
        let empty = KnowledgeSnapshot::new();
        let scorer = ConstantScorer::neutral();

        let c = classifier
            .classify(&token("张三", "nr", 0), &empty, &scorer)
            .unwrap();
        assert_eq!(c.span.label, Label::Person);
        assert_eq!(c.span.tag_type, TagType::NamedEntity);

        let c = classifier
            .classify(&token("今天", "time-word", 0), &empty, &scorer)
            .unwrap();
        assert_eq!(c.span.label, Label::Time);

        assert!(classifier
            .classify(&token("天气", "n", 0), &empty, &scorer)
            .is_none());
    }

    #[test]
    fn test_sentiment_rule_thresholds() {
        let classifier = HeuristicClassifier::default();
        let empty = KnowledgeSnapshot::new();
        let word = token("美丽", "a", 0);

        for (score, expected) in [(0.9, true), (0.1, true), (0.5, false), (0.6, false), (0.4, false)] {
            let result = classifier.classify(&word, &empty, &ConstantScorer::new(score));
            assert_eq!(result.is_some(), expected, "score {score}");
        }

        let c = classifier
            .classify(&word, &empty, &ConstantScorer::new(0.95))
            .unwrap();
        assert_eq!(c.span.label, Label::Sentiment);
        assert_eq!(c.span.tag_type, TagType::Sentiment);
    }

    #[test]
    fn test_single_char_tokens_never_scored() {
        let classifier = HeuristicClassifier::default();
        let scorer = CountingScorer {
            score: 0.99,
            calls: AtomicUsize::new(0),
        };

        let result = classifier.classify(&token("好", "a", 0), &KnowledgeSnapshot::new(), &scorer);
        assert!(result.is_none());
        assert_eq!(scorer.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_non_sentiment_tags_never_scored() {
        let classifier = HeuristicClassifier::default();
        let scorer = CountingScorer {
            score: 0.99,
            calls: AtomicUsize::new(0),
        };

        assert!(classifier
            .classify(&token("天气", "n", 0), &KnowledgeSnapshot::new(), &scorer)
            .is_none());
        assert!(classifier
            .classify(&token("北京", "ns", 0), &KnowledgeSnapshot::new(), &scorer)
            .is_some());
        assert_eq!(scorer.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_scorer_failure_yields_no_label() {
        let classifier = HeuristicClassifier::default();
        let result =
            classifier.classify(&token("美丽", "a", 0), &KnowledgeSnapshot::new(), &FailingScorer);
        assert!(result.is_none());
    }

    #[test]
    fn test_knowledge_keys_and_unaligned_tokens_skipped() {
        let classifier = HeuristicClassifier::default();
        let snapshot = KnowledgeSnapshot::from_pairs([("张三", Label::Person)]);
        let scorer = ConstantScorer::neutral();

        assert!(classifier
            .classify(&token("张三", "nr", 0), &snapshot, &scorer)
            .is_none());
        let unaligned = Token::new("李四", PosTag::PersonName, None);
        assert!(classifier
            .classify(&unaligned, &KnowledgeSnapshot::new(), &scorer)
            .is_none());
    }
}
