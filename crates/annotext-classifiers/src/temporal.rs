//! Date and time expression matcher

use crate::classifier::{Candidate, CandidateSource};
use crate::config::TemporalConfig;
use annotext_core::{Error, Label, Result, Span, TextIndex};
use regex::Regex;

/// Regex-based temporal matcher.
///
/// All configured patterns are joined into one alternation and run over the
/// whole text, so matches are leftmost and non-overlapping and the earliest
/// alternative wins at a given position.
#[derive(Debug, Clone)]
pub struct TemporalMatcher {
    regex: Regex,
}

impl TemporalMatcher {
    pub fn new(config: &TemporalConfig) -> Result<Self> {
        if config.patterns.is_empty() {
            return Err(Error::config("no temporal patterns configured"));
        }

        let combined = config
            .patterns
            .iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");

        let regex = Regex::new(&combined)
            .map_err(|e| Error::config(format!("Failed to compile temporal regex: {}", e)))?;

        Ok(Self { regex })
    }

    /// Candidates in match order
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let index = TextIndex::new(text);
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| {
                let (start, end) = index.char_range(m.start(), m.end());
                Candidate::new(
                    Span::new(start, end, Label::Time),
                    m.as_str(),
                    CandidateSource::Temporal,
                )
            })
            .collect()
    }
}

impl Default for TemporalMatcher {
    fn default() -> Self {
        Self::new(&TemporalConfig::default()).expect("Failed to create temporal matcher")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotext_core::TagType;

    fn matches(text: &str) -> Vec<(usize, usize, String)> {
        TemporalMatcher::default()
            .candidates(text)
            .into_iter()
            .map(|c| (c.span.start, c.span.end, c.text))
            .collect()
    }

    #[test]
    fn test_full_date_preferred_over_month_day() {
        assert_eq!(matches("会议在2024年5月3日举行"), vec![(3, 12, "2024年5月3日".to_string())]);
        assert_eq!(matches("2024-05-03"), vec![(0, 10, "2024-05-03".to_string())]);
    }

    #[test]
    fn test_year_month() {
        assert_eq!(matches("2023年12月的报告"), vec![(0, 8, "2023年12月".to_string())]);
    }

    #[test]
    fn test_relative_words() {
        let found: Vec<String> = matches("昨天下雨，今天晴，下月再说，星期五见，周日休息")
            .into_iter()
            .map(|(_, _, t)| t)
            .collect();
        assert_eq!(found, vec!["昨天", "今天", "下月", "星期五", "周日"]);
    }

    #[test]
    fn test_month_day() {
        assert_eq!(matches("5月3日"), vec![(0, 4, "5月3日".to_string())]);
    }

    #[test]
    fn test_labels() {
        let candidates = TemporalMatcher::default().candidates("明天");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].span.label, Label::Time);
        assert_eq!(candidates[0].span.tag_type, TagType::NamedEntity);
        assert_eq!(candidates[0].source, CandidateSource::Temporal);
    }

    #[test]
    fn test_bad_pattern_is_config_error() {
        let config = TemporalConfig {
            patterns: vec!["(unclosed".to_string()],
        };
        assert!(matches!(TemporalMatcher::new(&config), Err(Error::Config(_))));
    }
}
