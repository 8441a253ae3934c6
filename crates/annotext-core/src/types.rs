//! Core types for annotext

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored document
pub type DocumentId = u64;

/// Identifier of a stored annotation
pub type AnnotationId = u64;

/// Lifecycle of a document in the operator workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Uploaded, never annotated
    #[default]
    NotStarted,
    /// Annotated at least once, automatically or by hand
    InProgress,
    /// Closed by explicit operator action
    Completed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw document as owned by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Storage identifier
    pub id: DocumentId,

    /// Name shown to the operator
    pub filename: String,

    /// Immutable document text
    pub content: String,

    /// When the document was uploaded or entered
    pub uploaded_at: DateTime<Utc>,

    /// Workflow status
    #[serde(default)]
    pub status: DocumentStatus,
}

/// How a span is labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[serde(alias = "人名")]
    Person,
    #[serde(alias = "地名")]
    Place,
    #[serde(alias = "组织")]
    Organization,
    #[serde(alias = "时间")]
    Time,
    #[serde(alias = "情感")]
    Sentiment,
    None,
}

impl Label {
    /// Labels reported by statistics, in display order
    pub const COUNTED: [Label; 5] = [
        Label::Person,
        Label::Place,
        Label::Organization,
        Label::Time,
        Label::Sentiment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Place => "place",
            Self::Organization => "organization",
            Self::Time => "time",
            Self::Sentiment => "sentiment",
            Self::None => "none",
        }
    }

    /// Whether this label names an entity rather than a sentiment
    pub fn is_entity(&self) -> bool {
        matches!(
            self,
            Self::Person | Self::Place | Self::Organization | Self::Time
        )
    }

    /// Tag type implied by the label: entity labels are named entities,
    /// everything else is a sentiment annotation.
    pub fn tag_type(&self) -> TagType {
        if self.is_entity() {
            TagType::NamedEntity
        } else {
            TagType::Sentiment
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "person" | "人名" => Ok(Self::Person),
            "place" | "地名" => Ok(Self::Place),
            "organization" | "organisation" | "组织" => Ok(Self::Organization),
            "time" | "时间" => Ok(Self::Time),
            "sentiment" | "情感" => Ok(Self::Sentiment),
            "none" => Ok(Self::None),
            other => Err(crate::Error::invalid_input(format!("unknown label '{other}'"))),
        }
    }
}

/// Annotation family a span belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagType {
    #[serde(alias = "命名实体")]
    NamedEntity,
    #[serde(alias = "情感标注")]
    Sentiment,
}

impl TagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NamedEntity => "named_entity",
            Self::Sentiment => "sentiment",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled half-open char range `[start, end)` over a document's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: Label,
    pub tag_type: TagType,
}

impl Span {
    /// Create a span whose tag type follows from its label
    pub fn new(start: usize, end: usize, label: Label) -> Self {
        Self {
            start,
            end,
            label,
            tag_type: label.tag_type(),
        }
    }

    /// Create a span with an explicit tag type
    pub fn with_tag_type(start: usize, end: usize, label: Label, tag_type: TagType) -> Self {
        Self {
            start,
            end,
            label,
            tag_type,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the two ranges share at least one char index
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Wire record for one committed span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRecord {
    pub start: usize,
    pub end: usize,
    pub selected_text: String,
    pub tag_type: TagType,
    pub label: Label,
}

impl AnnotationRecord {
    pub fn from_span(span: &Span, selected_text: impl Into<String>) -> Self {
        Self {
            start: span.start,
            end: span.end,
            selected_text: selected_text.into(),
            tag_type: span.tag_type,
            label: span.label,
        }
    }

    pub fn span(&self) -> Span {
        Span::with_tag_type(self.start, self.end, self.label, self.tag_type)
    }
}

/// A stored annotation: a wire record plus its storage identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    pub document_id: DocumentId,
    #[serde(flatten)]
    pub record: AnnotationRecord,
    pub created_at: DateTime<Utc>,
}

/// Whole-document sentiment bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBucket {
    /// Bucket a score with strict thresholds on both sides
    pub fn from_score(score: f32, positive_threshold: f32, negative_threshold: f32) -> Self {
        if score > positive_threshold {
            Self::Positive
        } else if score < negative_threshold {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document-scoped classification, overwritten on every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnnotation {
    pub category: String,
    pub sentiment: SentimentBucket,
    pub score: f32,
}

/// Everything an annotation run hands to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    /// Committed spans ordered by start offset
    pub annotations: Vec<AnnotationRecord>,

    /// Document-level record, if one was derived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentAnnotation>,
}

impl AnnotationSet {
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn count_label(&self, label: Label) -> usize {
        self.annotations.iter().filter(|a| a.label == label).count()
    }
}

/// Where a knowledge entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeSource {
    #[default]
    Manual,
    Auto,
    Import,
}

impl KnowledgeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for KnowledgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnowledgeSource {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            "import" => Ok(Self::Import),
            other => Err(crate::Error::invalid_input(format!(
                "unknown knowledge source '{other}'"
            ))),
        }
    }
}

/// A learned surface text, unique by `text`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub text: String,
    pub label: Label,
    #[serde(default)]
    pub source: KnowledgeSource,
    pub created_at: DateTime<Utc>,
}

impl KnowledgeEntry {
    pub fn new(text: impl Into<String>, label: Label, source: KnowledgeSource) -> Self {
        Self {
            text: text.into(),
            label,
            source,
            created_at: Utc::now(),
        }
    }
}
