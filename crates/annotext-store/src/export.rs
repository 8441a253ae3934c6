//! Knowledge-base export and import document

use annotext_core::{Error, KnowledgeEntry, Label, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedEntity {
    pub text: String,
    pub label: Label,
    pub source: String,
    pub created_time: String,
}

/// `{entities, export_time, total}` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeExport {
    pub entities: Vec<ExportedEntity>,
    pub export_time: String,
    pub total: usize,
}

impl KnowledgeExport {
    pub fn from_entries(entries: &[KnowledgeEntry]) -> Self {
        let entities: Vec<ExportedEntity> = entries
            .iter()
            .map(|e| ExportedEntity {
                text: e.text.clone(),
                label: e.label,
                source: e.source.to_string(),
                created_time: e.created_at.format(TIME_FORMAT).to_string(),
            })
            .collect();

        Self {
            total: entities.len(),
            entities,
            export_time: Utc::now().format(TIME_FORMAT).to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Read `(text, label)` pairs from an export document.
///
/// Only the `entities` array is required to be well formed; items that are
/// not objects, lack a text or label, or carry an unknown label are skipped.
/// A missing `entities` key yields no pairs.
pub fn parse_import(json: &str) -> Result<Vec<(String, Label)>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let root = value
        .as_object()
        .ok_or_else(|| Error::invalid_input("import document must be a JSON object"))?;

    let Some(entities) = root.get("entities") else {
        return Ok(Vec::new());
    };
    let items = entities
        .as_array()
        .ok_or_else(|| Error::invalid_input("'entities' must be an array"))?;

    let mut pairs = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let text = item.get("text").and_then(|v| v.as_str()).unwrap_or("").trim();
        let label = item.get("label").and_then(|v| v.as_str()).unwrap_or("").trim();

        if text.is_empty() || label.is_empty() {
            debug!("Skipping import item {}: missing text or label", i);
            continue;
        }
        match Label::from_str(label) {
            Ok(label) => pairs.push((text.to_string(), label)),
            Err(e) => debug!("Skipping import item {}: {}", i, e),
        }
    }

    Ok(pairs)
}
