//! Whole-document category and sentiment

use crate::classifier::{checked_score, SentimentScorer};
use crate::config::{AnnotatorConfig, SentimentConfig};
use aho_corasick::AhoCorasick;
use annotext_core::{DocumentAnnotation, Error, Result};
use tracing::debug;

/// Neutral score used when the scorer cannot produce one
pub const NEUTRAL_SCORE: f32 = 0.5;

struct Bucket {
    name: String,
    keywords: Option<AhoCorasick>,
}

/// Keyword-bucket categorizer plus bucketed document sentiment.
///
/// The category is the first bucket, in declaration order, with any keyword
/// present in the text. There is no scoring between buckets.
pub struct DocumentClassifier {
    buckets: Vec<Bucket>,
    default_category: String,
    sentiment: SentimentConfig,
}

impl DocumentClassifier {
    pub fn new(config: &AnnotatorConfig) -> Result<Self> {
        let mut buckets = Vec::with_capacity(config.categories.len());

        for bucket in &config.categories {
            let keywords: Vec<&str> = bucket
                .keywords
                .iter()
                .map(|k| k.as_str())
                .filter(|k| !k.is_empty())
                .collect();

            let matcher = if keywords.is_empty() {
                None
            } else {
                Some(
                    AhoCorasick::builder()
                        .ascii_case_insensitive(true)
                        .build(&keywords)
                        .map_err(|e| {
                            Error::config(format!(
                                "Failed to build keyword matcher for '{}': {}",
                                bucket.name, e
                            ))
                        })?,
                )
            };

            buckets.push(Bucket {
                name: bucket.name.clone(),
                keywords: matcher,
            });
        }

        Ok(Self {
            buckets,
            default_category: config.default_category.clone(),
            sentiment: config.sentiment.clone(),
        })
    }

    /// First matching bucket, or the default category
    pub fn category(&self, text: &str) -> &str {
        self.buckets
            .iter()
            .find(|b| b.keywords.as_ref().is_some_and(|m| m.is_match(text)))
            .map(|b| b.name.as_str())
            .unwrap_or(&self.default_category)
    }

    /// Classify a document. Scorer failures fall back to a neutral score.
    pub fn classify(&self, text: &str, scorer: &dyn SentimentScorer) -> DocumentAnnotation {
        let score = checked_score(scorer, text).unwrap_or_else(|| {
            debug!("document sentiment defaulted to neutral");
            NEUTRAL_SCORE
        });

        DocumentAnnotation {
            category: self.category(text).to_string(),
            sentiment: self.sentiment.bucket(score),
            score,
        }
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(&AnnotatorConfig::default()).expect("Failed to create document classifier")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ConstantScorer;
    use crate::config::CategoryBucket;
    use annotext_core::SentimentBucket;

    fn config(buckets: Vec<CategoryBucket>) -> AnnotatorConfig {
        AnnotatorConfig {
            categories: buckets,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_declared_bucket_wins() {
        let classifier = DocumentClassifier::new(&config(vec![
            CategoryBucket::new("sports", &["比赛"]),
            CategoryBucket::new("finance", &["比赛", "股票"]),
        ]))
        .unwrap();

        assert_eq!(classifier.category("股票比赛"), "sports");
        assert_eq!(classifier.category("股票大涨"), "finance");
        assert_eq!(classifier.category("天气很好"), "other");
    }

    #[test]
    fn test_empty_bucket_never_matches() {
        let classifier = DocumentClassifier::new(&config(vec![
            CategoryBucket::new("empty", &[""]),
            CategoryBucket::new("tech", &["软件"]),
        ]))
        .unwrap();
        assert_eq!(classifier.category("软件"), "tech");
        assert_eq!(classifier.category("没有"), "other");
    }

    #[test]
    fn test_sentiment_buckets() {
        let classifier = DocumentClassifier::default();

        let doc = classifier.classify("今天的比赛", &ConstantScorer::new(0.8));
        assert_eq!(doc.category, "sports");
        assert_eq!(doc.sentiment, SentimentBucket::Positive);

        let doc = classifier.classify("今天", &ConstantScorer::new(0.2));
        assert_eq!(doc.sentiment, SentimentBucket::Negative);

        let doc = classifier.classify("今天", &ConstantScorer::new(0.6));
        assert_eq!(doc.sentiment, SentimentBucket::Neutral);
    }

    #[test]
    fn test_scorer_failure_defaults_to_neutral() {
        let classifier = DocumentClassifier::default();
        // ConstantScorer refuses blank text
        let doc = classifier.classify("   ", &ConstantScorer::new(0.9));
        assert_eq!(doc.score, NEUTRAL_SCORE);
        assert_eq!(doc.sentiment, SentimentBucket::Neutral);
        assert_eq!(doc.category, "other");
    }
}
