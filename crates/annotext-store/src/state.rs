//! Event-sourced store state
//!
//! Every mutation is expressed as a [`StoreEvent`]. A store validates the
//! request against the current [`StoreState`], records the resulting event,
//! and then applies it. Replaying the same events always rebuilds the same
//! state, ids included.

use annotext_core::{
    Annotation, AnnotationId, AnnotationRecord, Document, DocumentAnnotation, DocumentId,
    DocumentStatus, Error, KnowledgeEntry, Result,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    DocumentInserted {
        document: Document,
    },
    DocumentDeleted {
        id: DocumentId,
    },
    StatusChanged {
        id: DocumentId,
        status: DocumentStatus,
    },
    AnnotationsReplaced {
        document_id: DocumentId,
        annotations: Vec<Annotation>,
        #[serde(default)]
        summary: Option<DocumentAnnotation>,
    },
    AnnotationDeleted {
        id: AnnotationId,
    },
    AnnotationsCleared {
        document_id: DocumentId,
    },
    KnowledgeInserted {
        entry: KnowledgeEntry,
    },
    KnowledgeDeleted {
        text: String,
    },
    KnowledgeCleared,
    /// Id counters carried across compaction, so ids of deleted records
    /// are never handed out again
    CountersRestored {
        next_document_id: DocumentId,
        next_annotation_id: AnnotationId,
    },
}

/// A document together with everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub document: Document,

    /// Annotations ordered by start offset
    pub annotations: Vec<Annotation>,

    /// Document-level record of the last automatic run
    pub summary: Option<DocumentAnnotation>,
}

/// In-memory state shared by all store implementations
#[derive(Debug, Clone)]
pub struct StoreState {
    documents: BTreeMap<DocumentId, StoredDocument>,
    knowledge: Vec<KnowledgeEntry>,
    next_document_id: DocumentId,
    next_annotation_id: AnnotationId,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            documents: BTreeMap::new(),
            knowledge: Vec::new(),
            next_document_id: 1,
            next_annotation_id: 1,
        }
    }
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- reads ----

    pub fn stored(&self, id: DocumentId) -> Result<&StoredDocument> {
        self.documents.get(&id).ok_or(Error::DocumentNotFound(id))
    }

    pub fn documents(&self) -> impl Iterator<Item = &StoredDocument> {
        self.documents.values()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn knowledge(&self) -> &[KnowledgeEntry] {
        &self.knowledge
    }

    pub fn has_knowledge(&self, text: &str) -> bool {
        self.knowledge.iter().any(|e| e.text == text)
    }

    fn owner_of(&self, annotation_id: AnnotationId) -> Option<DocumentId> {
        self.documents
            .values()
            .find(|d| d.annotations.iter().any(|a| a.id == annotation_id))
            .map(|d| d.document.id)
    }

    // ---- planning: validate a request and produce its event ----

    pub fn plan_insert_document(&self, filename: &str, content: &str) -> (StoreEvent, Document) {
        let document = Document {
            id: self.next_document_id,
            filename: filename.to_string(),
            content: content.to_string(),
            uploaded_at: Utc::now(),
            status: DocumentStatus::NotStarted,
        };
        (
            StoreEvent::DocumentInserted {
                document: document.clone(),
            },
            document,
        )
    }

    pub fn plan_delete_document(&self, id: DocumentId) -> Result<StoreEvent> {
        self.stored(id)?;
        Ok(StoreEvent::DocumentDeleted { id })
    }

    pub fn plan_set_status(&self, id: DocumentId, status: DocumentStatus) -> Result<StoreEvent> {
        self.stored(id)?;
        Ok(StoreEvent::StatusChanged { id, status })
    }

    pub fn plan_replace_annotations(
        &self,
        document_id: DocumentId,
        mut records: Vec<AnnotationRecord>,
        summary: Option<DocumentAnnotation>,
    ) -> Result<(StoreEvent, Vec<Annotation>)> {
        let stored = self.stored(document_id)?;
        for record in &records {
            check_range(&stored.document, record)?;
        }
        records.sort_by_key(|r| (r.start, r.end));

        let now = Utc::now();
        let annotations: Vec<Annotation> = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| Annotation {
                id: self.next_annotation_id + i as AnnotationId,
                document_id,
                record,
                created_at: now,
            })
            .collect();

        let event = StoreEvent::AnnotationsReplaced {
            document_id,
            annotations: annotations.clone(),
            summary,
        };
        Ok((event, annotations))
    }

    /// Insert one annotation, dropping every existing annotation of the
    /// document that overlaps it. The document-level record is kept.
    pub fn plan_save_annotation(
        &self,
        document_id: DocumentId,
        record: AnnotationRecord,
    ) -> Result<(StoreEvent, Annotation)> {
        let stored = self.stored(document_id)?;
        check_range(&stored.document, &record)?;

        let annotation = Annotation {
            id: self.next_annotation_id,
            document_id,
            record,
            created_at: Utc::now(),
        };
        let span = annotation.record.span();

        let mut annotations: Vec<Annotation> = stored
            .annotations
            .iter()
            .filter(|a| !a.record.span().overlaps(&span))
            .cloned()
            .collect();
        let at = annotations.partition_point(|a| a.record.start <= span.start);
        annotations.insert(at, annotation.clone());

        let event = StoreEvent::AnnotationsReplaced {
            document_id,
            annotations,
            summary: stored.summary.clone(),
        };
        Ok((event, annotation))
    }

    pub fn plan_delete_annotation(&self, id: AnnotationId) -> Result<StoreEvent> {
        self.owner_of(id).ok_or(Error::AnnotationNotFound(id))?;
        Ok(StoreEvent::AnnotationDeleted { id })
    }

    pub fn plan_clear_annotations(&self, document_id: DocumentId) -> Result<StoreEvent> {
        self.stored(document_id)?;
        Ok(StoreEvent::AnnotationsCleared { document_id })
    }

    /// `None` when an entry with the same text already exists
    pub fn plan_insert_knowledge(&self, entry: KnowledgeEntry) -> Option<StoreEvent> {
        if self.has_knowledge(&entry.text) {
            return None;
        }
        Some(StoreEvent::KnowledgeInserted { entry })
    }

    pub fn plan_delete_knowledge(&self, text: &str) -> Result<StoreEvent> {
        if !self.has_knowledge(text) {
            return Err(Error::KnowledgeEntryNotFound(text.to_string()));
        }
        Ok(StoreEvent::KnowledgeDeleted {
            text: text.to_string(),
        })
    }

    // ---- applying ----

    pub fn apply(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::DocumentInserted { document } => {
                self.next_document_id = self.next_document_id.max(document.id + 1);
                self.documents.insert(
                    document.id,
                    StoredDocument {
                        document: document.clone(),
                        annotations: Vec::new(),
                        summary: None,
                    },
                );
            }
            StoreEvent::DocumentDeleted { id } => {
                self.documents.remove(id);
            }
            StoreEvent::StatusChanged { id, status } => {
                if let Some(stored) = self.documents.get_mut(id) {
                    stored.document.status = *status;
                }
            }
            StoreEvent::AnnotationsReplaced {
                document_id,
                annotations,
                summary,
            } => {
                if let Some(max) = annotations.iter().map(|a| a.id).max() {
                    self.next_annotation_id = self.next_annotation_id.max(max + 1);
                }
                if let Some(stored) = self.documents.get_mut(document_id) {
                    stored.annotations = annotations.clone();
                    stored.summary = summary.clone();
                }
            }
            StoreEvent::AnnotationDeleted { id } => {
                for stored in self.documents.values_mut() {
                    stored.annotations.retain(|a| a.id != *id);
                }
            }
            StoreEvent::AnnotationsCleared { document_id } => {
                if let Some(stored) = self.documents.get_mut(document_id) {
                    stored.annotations.clear();
                    stored.summary = None;
                }
            }
            StoreEvent::KnowledgeInserted { entry } => {
                if !self.has_knowledge(&entry.text) {
                    self.knowledge.push(entry.clone());
                }
            }
            StoreEvent::KnowledgeDeleted { text } => {
                self.knowledge.retain(|e| &e.text != text);
            }
            StoreEvent::KnowledgeCleared => {
                self.knowledge.clear();
            }
            StoreEvent::CountersRestored {
                next_document_id,
                next_annotation_id,
            } => {
                self.next_document_id = self.next_document_id.max(*next_document_id);
                self.next_annotation_id = self.next_annotation_id.max(*next_annotation_id);
            }
        }
    }

    /// Shortest event sequence that rebuilds this state, id counters
    /// included
    pub fn to_events(&self) -> Vec<StoreEvent> {
        let mut events = vec![StoreEvent::CountersRestored {
            next_document_id: self.next_document_id,
            next_annotation_id: self.next_annotation_id,
        }];

        for stored in self.documents.values() {
            events.push(StoreEvent::DocumentInserted {
                document: stored.document.clone(),
            });
            if !stored.annotations.is_empty() || stored.summary.is_some() {
                events.push(StoreEvent::AnnotationsReplaced {
                    document_id: stored.document.id,
                    annotations: stored.annotations.clone(),
                    summary: stored.summary.clone(),
                });
            }
        }

        events.extend(
            self.knowledge
                .iter()
                .map(|entry| StoreEvent::KnowledgeInserted {
                    entry: entry.clone(),
                }),
        );

        events
    }
}

fn check_range(document: &Document, record: &AnnotationRecord) -> Result<()> {
    let len = document.content.chars().count();
    if record.start >= record.end || record.end > len {
        return Err(Error::invalid_input(format!(
            "range [{}, {}) is not a non-empty span of document {} ({} chars)",
            record.start, record.end, document.id, len
        )));
    }
    Ok(())
}
