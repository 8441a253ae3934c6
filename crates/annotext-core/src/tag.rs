//! Part-of-speech tags reported by the tokenizer

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Part-of-speech tag attached to a token.
///
/// Only the tags the annotation rules look at get their own variant; anything
/// else is carried through verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PosTag {
    PersonName,
    PlaceName,
    OrganizationName,
    TimeWord,
    Adjective,
    AdverbialAdjective,
    Adverb,
    Noun,
    Verb,
    Punctuation,
    Other(String),
}

impl PosTag {
    /// Short jieba-style flag
    pub fn flag(&self) -> &str {
        match self {
            Self::PersonName => "nr",
            Self::PlaceName => "ns",
            Self::OrganizationName => "nt",
            Self::TimeWord => "t",
            Self::Adjective => "a",
            Self::AdverbialAdjective => "ad",
            Self::Adverb => "d",
            Self::Noun => "n",
            Self::Verb => "v",
            Self::Punctuation => "w",
            Self::Other(flag) => flag,
        }
    }

    /// Descriptive name
    pub fn name(&self) -> &str {
        match self {
            Self::PersonName => "proper-noun-person",
            Self::PlaceName => "proper-noun-place",
            Self::OrganizationName => "proper-noun-organization",
            Self::TimeWord => "time-word",
            Self::Adjective => "adjective",
            Self::AdverbialAdjective => "adverbial-adjective",
            Self::Adverb => "adverb-degree",
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Punctuation => "punct",
            Self::Other(flag) => flag,
        }
    }

    /// Adjectives and degree adverbs are the only tags scored for sentiment
    pub fn is_sentiment_bearing(&self) -> bool {
        matches!(
            self,
            Self::Adjective | Self::AdverbialAdjective | Self::Adverb
        )
    }

    /// Chinese display name and style class used by the segment view
    pub fn display(&self) -> (&'static str, &'static str) {
        match self.flag() {
            "n" => ("名词", "primary"),
            "nr" => ("人名", "info"),
            "ns" => ("地名", "success"),
            "nt" => ("机构", "danger"),
            "nz" => ("其他专名", "primary"),
            "v" => ("动词", "success"),
            "vd" => ("副动词", "success"),
            "vn" => ("名动词", "success"),
            "a" => ("形容词", "warning"),
            "ad" => ("副形词", "warning"),
            "d" => ("副词", "secondary"),
            "m" => ("数词", "dark"),
            "q" => ("量词", "dark"),
            "r" => ("代词", "secondary"),
            "p" => ("介词", "secondary"),
            "c" => ("连词", "secondary"),
            "u" => ("助词", "secondary"),
            "xc" => ("虚词", "secondary"),
            "w" | "x" => ("标点", "light"),
            "t" => ("时间", "info"),
            _ => ("其他", "light"),
        }
    }
}

impl FromStr for PosTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim() {
            "nr" | "proper-noun-person" => Self::PersonName,
            "ns" | "proper-noun-place" => Self::PlaceName,
            "nt" | "proper-noun-organization" => Self::OrganizationName,
            "t" | "time-word" => Self::TimeWord,
            "a" | "adjective" => Self::Adjective,
            "ad" | "adverbial-adjective" => Self::AdverbialAdjective,
            "d" | "adverb" | "adverb-degree" => Self::Adverb,
            "n" | "noun" => Self::Noun,
            "v" | "verb" => Self::Verb,
            "w" | "x" | "punct" | "punctuation" => Self::Punctuation,
            other => Self::Other(other.to_string()),
        };
        Ok(tag)
    }
}

impl From<&str> for PosTag {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(tag) => tag,
            Err(never) => match never {},
        }
    }
}

impl From<String> for PosTag {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<PosTag> for String {
    fn from(tag: PosTag) -> Self {
        tag.flag().to_string()
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
