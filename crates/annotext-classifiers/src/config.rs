//! Configuration for the annotation classifiers

use annotext_core::{Error, Result, SentimentBucket};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for all classifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Sentiment thresholds
    #[serde(default)]
    pub sentiment: SentimentConfig,

    /// Date/time patterns
    #[serde(default)]
    pub temporal: TemporalConfig,

    /// Keyword buckets, tested in declaration order
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryBucket>,

    /// Category used when no bucket matches
    #[serde(default = "default_category")]
    pub default_category: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            sentiment: SentimentConfig::default(),
            temporal: TemporalConfig::default(),
            categories: default_categories(),
            default_category: default_category(),
        }
    }
}

impl AnnotatorConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse annotator config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Reject threshold combinations that would make every score polarized
    pub fn validate(&self) -> Result<()> {
        let s = &self.sentiment;
        if !(0.0..=1.0).contains(&s.positive_threshold)
            || !(0.0..=1.0).contains(&s.negative_threshold)
        {
            return Err(Error::config("sentiment thresholds must lie in [0, 1]"));
        }
        if s.negative_threshold > s.positive_threshold {
            return Err(Error::config(
                "negative_threshold must not exceed positive_threshold",
            ));
        }
        if self.temporal.patterns.is_empty() {
            return Err(Error::config("at least one temporal pattern is required"));
        }
        Ok(())
    }
}

/// Sentiment thresholds shared by token and document scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Scores strictly above this are positive
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f32,

    /// Scores strictly below this are negative
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f32,

    /// Tokens shorter than this many chars are never scored
    #[serde(default = "default_min_token_chars")]
    pub min_token_chars: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
            min_token_chars: default_min_token_chars(),
        }
    }
}

impl SentimentConfig {
    /// Whether a score is confidently away from neutral
    pub fn is_polarized(&self, score: f32) -> bool {
        score > self.positive_threshold || score < self.negative_threshold
    }

    pub fn bucket(&self, score: f32) -> SentimentBucket {
        SentimentBucket::from_score(score, self.positive_threshold, self.negative_threshold)
    }
}

/// Date/time pattern configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalConfig {
    /// Alternatives joined into one expression; earlier ones win at a
    /// given start position
    #[serde(default = "default_temporal_patterns")]
    pub patterns: Vec<String>,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            patterns: default_temporal_patterns(),
        }
    }
}

/// A named keyword list for document categorization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryBucket {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

fn default_positive_threshold() -> f32 {
    0.6
}

fn default_negative_threshold() -> f32 {
    0.4
}

fn default_min_token_chars() -> usize {
    2
}

fn default_category() -> String {
    "other".to_string()
}

fn default_temporal_patterns() -> Vec<String> {
    [
        // year-month-day
        r"(\d{4})(?:年|-|/)(\d{1,2})(?:月|-|/)(\d{1,2})(?:日)?",
        // month-day
        r"(\d{1,2})(?:月|-|/)(\d{1,2})(?:日)?",
        // year-month
        r"(\d{4})(?:年)(\d{1,2})(?:月)",
        r"(?:今年|去年|明年|今天|明天|昨天)",
        r"(?:本月|上月|下月)",
        r"(?:星期|周)(?:一|二|三|四|五|六|日|天)",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_categories() -> Vec<CategoryBucket> {
    vec![
        CategoryBucket::new(
            "sports",
            &["体育", "比赛", "足球", "篮球", "运动员", "冠军", "sports", "match"],
        ),
        CategoryBucket::new(
            "finance",
            &["经济", "股票", "金融", "银行", "市场", "投资", "finance", "stock"],
        ),
        CategoryBucket::new(
            "technology",
            &["科技", "技术", "互联网", "手机", "人工智能", "软件", "technology", "software"],
        ),
        CategoryBucket::new(
            "entertainment",
            &["娱乐", "电影", "明星", "音乐", "综艺", "movie", "music"],
        ),
        CategoryBucket::new(
            "politics",
            &["政府", "政策", "会议", "外交", "选举", "government", "election"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnnotatorConfig::default();
        assert_eq!(config.sentiment.positive_threshold, 0.6);
        assert_eq!(config.sentiment.negative_threshold, 0.4);
        assert_eq!(config.sentiment.min_token_chars, 2);
        assert_eq!(config.temporal.patterns.len(), 6);
        assert_eq!(config.default_category, "other");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
sentiment:
  positive_threshold: 0.7
categories:
  - name: weather
    keywords: ["天气", "下雨"]
"#;
        let config = AnnotatorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.sentiment.positive_threshold, 0.7);
        assert_eq!(config.sentiment.negative_threshold, 0.4);
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].name, "weather");
        assert_eq!(config.temporal.patterns.len(), 6);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let yaml = r#"
sentiment:
  positive_threshold: 0.3
  negative_threshold: 0.5
"#;
        assert!(AnnotatorConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_polarization_is_strict() {
        let s = SentimentConfig::default();
        assert!(!s.is_polarized(0.6));
        assert!(!s.is_polarized(0.4));
        assert!(!s.is_polarized(0.5));
        assert!(s.is_polarized(0.600_1));
        assert!(s.is_polarized(0.399_9));
    }
}
