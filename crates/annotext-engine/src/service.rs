//! Annotation service
//!
//! Ties the pipeline to a store. Every operation addressing a missing
//! document, annotation, or knowledge entry fails with a not-found error and
//! changes nothing.

use crate::feedback;
use crate::pipeline::AnnotationPipeline;
use crate::segments::{self, Segment};
use annotext_core::{
    Annotation, AnnotationId, AnnotationRecord, AnnotationSet, Document, DocumentId,
    DocumentStatus, Error, KnowledgeEntry, KnowledgeSource, Label, Result, Span, TextIndex,
};
use annotext_store::{parse_import, AnnotationStats, AnnotationStore, KnowledgeExport};
use std::sync::Arc;
use tracing::info;

pub struct AnnotationService {
    store: Arc<dyn AnnotationStore>,
    pipeline: AnnotationPipeline,
}

impl AnnotationService {
    pub fn new(store: Arc<dyn AnnotationStore>, pipeline: AnnotationPipeline) -> Self {
        Self { store, pipeline }
    }

    pub fn store(&self) -> &dyn AnnotationStore {
        self.store.as_ref()
    }

    // ---- documents ----

    /// Register uploaded content under its file name
    pub fn add_document(&self, filename: &str, content: &str) -> Result<Document> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(Error::invalid_input("file name is empty"));
        }
        let document = self.store.insert_document(filename, content)?;
        info!("Added document {} ({})", document.id, document.filename);
        Ok(document)
    }

    /// Create a document from typed text. `.txt` is appended to the name
    /// when missing.
    pub fn new_document(&self, name: &str, text: &str) -> Result<Document> {
        let name = name.trim();
        let text = text.trim();
        if name.is_empty() || text.is_empty() {
            return Err(Error::invalid_input("document name and text are required"));
        }

        let filename = if name.ends_with(".txt") {
            name.to_string()
        } else {
            format!("{name}.txt")
        };
        self.add_document(&filename, text)
    }

    pub fn document(&self, id: DocumentId) -> Result<Document> {
        self.store.document(id)
    }

    /// Newest first
    pub fn documents(&self) -> Result<Vec<Document>> {
        self.store.documents()
    }

    pub fn delete_document(&self, id: DocumentId) -> Result<()> {
        self.store.delete_document(id)?;
        info!("Deleted document {}", id);
        Ok(())
    }

    pub fn mark_complete(&self, id: DocumentId) -> Result<()> {
        self.store.set_status(id, DocumentStatus::Completed)
    }

    // ---- annotation ----

    /// Run the pipeline over a document and replace its stored annotations
    /// and document-level record with the result.
    ///
    /// The knowledge base is read once, before the run.
    pub fn auto_annotate(&self, id: DocumentId) -> Result<AnnotationSet> {
        let document = self.store.document(id)?;
        let snapshot = self.store.knowledge_snapshot()?;

        let set = self.pipeline.annotate(&document.content, &snapshot);

        self.store
            .replace_annotations(id, set.annotations.clone(), set.document.clone())?;
        self.store.set_status(id, DocumentStatus::InProgress)?;

        info!(
            "Document {} annotated with {} spans ({} knowledge entries)",
            id,
            set.len(),
            snapshot.len()
        );
        Ok(set)
    }

    /// Stored annotations and document-level record
    pub fn annotation_set(&self, id: DocumentId) -> Result<AnnotationSet> {
        Ok(AnnotationSet {
            annotations: self
                .store
                .annotations(id)?
                .into_iter()
                .map(|a| a.record)
                .collect(),
            document: self.store.document_annotation(id)?,
        })
    }

    pub fn annotations(&self, id: DocumentId) -> Result<Vec<Annotation>> {
        self.store.annotations(id)
    }

    /// Manually label `[start, end)` of a document.
    ///
    /// Annotations overlapping the range are replaced. The covered text is
    /// then promoted into the knowledge base exactly as it appears. A
    /// whitespace-only selection is rejected before anything is written.
    pub fn save_annotation(
        &self,
        id: DocumentId,
        start: usize,
        end: usize,
        label: Label,
    ) -> Result<Annotation> {
        let document = self.store.document(id)?;
        let index = TextIndex::new(&document.content);
        if start >= end || end > index.char_len() {
            return Err(Error::invalid_input(format!(
                "range [{}, {}) is outside document {} ({} chars)",
                start,
                end,
                id,
                index.char_len()
            )));
        }

        let selected = index.slice(start, end);
        if selected.trim().is_empty() {
            return Err(Error::invalid_input(format!(
                "range [{}, {}) of document {} covers only whitespace",
                start, end, id
            )));
        }
        let record = AnnotationRecord::from_span(&Span::new(start, end, label), selected);
        let annotation = self.store.save_annotation(id, record)?;
        self.store.set_status(id, DocumentStatus::InProgress)?;

        feedback::promote(
            self.store.as_ref(),
            selected,
            label,
            KnowledgeSource::Manual,
        )?;
        Ok(annotation)
    }

    pub fn delete_annotation(&self, id: AnnotationId) -> Result<()> {
        self.store.delete_annotation(id)
    }

    /// Drop every annotation of a document and reset it to not started
    pub fn clear_annotations(&self, id: DocumentId) -> Result<()> {
        self.store.clear_annotations(id)?;
        self.store.set_status(id, DocumentStatus::NotStarted)
    }

    /// Token view of a document with the labels of its stored spans
    pub fn segments(&self, id: DocumentId) -> Result<Vec<Segment>> {
        let document = self.store.document(id)?;
        let stream = self.pipeline.tokenize(&document.content);
        let records: Vec<AnnotationRecord> = self
            .store
            .annotations(id)?
            .into_iter()
            .map(|a| a.record)
            .collect();
        Ok(segments::segments(&stream, &records))
    }

    // ---- knowledge base ----

    pub fn promote_to_knowledge_base(
        &self,
        text: &str,
        label: Label,
        source: KnowledgeSource,
    ) -> Result<bool> {
        feedback::promote(self.store.as_ref(), text, label, source)
    }

    /// Entries sorted by text
    pub fn knowledge_entries(&self) -> Result<Vec<KnowledgeEntry>> {
        let mut entries = self.store.knowledge_entries()?;
        entries.sort_by(|a, b| a.text.cmp(&b.text));
        Ok(entries)
    }

    pub fn delete_knowledge(&self, text: &str) -> Result<()> {
        self.store.delete_knowledge(text)
    }

    /// Returns the number of removed entries
    pub fn clear_knowledge(&self) -> Result<usize> {
        let removed = self.store.clear_knowledge()?;
        info!("Cleared {} knowledge entries", removed);
        Ok(removed)
    }

    pub fn export_knowledge(&self) -> Result<KnowledgeExport> {
        Ok(KnowledgeExport::from_entries(&self.knowledge_entries()?))
    }

    /// Import an export document; returns how many entries were new
    pub fn import_knowledge(&self, json: &str) -> Result<usize> {
        let mut imported = 0;
        for (text, label) in parse_import(json)? {
            if feedback::promote(self.store.as_ref(), &text, label, KnowledgeSource::Import)? {
                imported += 1;
            }
        }
        info!("Imported {} knowledge entries", imported);
        Ok(imported)
    }

    pub fn stats(&self) -> Result<AnnotationStats> {
        self.store.stats()
    }

    /// Shrink the store's history to the events that rebuild its state
    pub fn compact_store(&self) -> Result<()> {
        self.store.compact()?;
        info!("Compacted store");
        Ok(())
    }
}
