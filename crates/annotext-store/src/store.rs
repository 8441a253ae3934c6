//! Storage collaborator interface

use crate::state::{StoreEvent, StoreState};
use crate::stats::AnnotationStats;
use annotext_core::{
    Annotation, AnnotationId, AnnotationRecord, Document, DocumentAnnotation, DocumentId,
    DocumentStatus, Error, KnowledgeEntry, KnowledgeSnapshot, Result,
};

/// Everything the annotation service needs from persistence.
///
/// Each call is atomic: it either applies completely or fails without a
/// visible change.
pub trait AnnotationStore: Send + Sync {
    fn insert_document(&self, filename: &str, content: &str) -> Result<Document>;

    fn document(&self, id: DocumentId) -> Result<Document>;

    /// All documents, newest upload first
    fn documents(&self) -> Result<Vec<Document>>;

    /// Remove a document with its annotations
    fn delete_document(&self, id: DocumentId) -> Result<()>;

    fn set_status(&self, id: DocumentId, status: DocumentStatus) -> Result<()>;

    /// Annotations of a document ordered by start offset
    fn annotations(&self, id: DocumentId) -> Result<Vec<Annotation>>;

    fn document_annotation(&self, id: DocumentId) -> Result<Option<DocumentAnnotation>>;

    /// Replace the full annotation set and document-level record
    fn replace_annotations(
        &self,
        id: DocumentId,
        records: Vec<AnnotationRecord>,
        summary: Option<DocumentAnnotation>,
    ) -> Result<Vec<Annotation>>;

    /// Insert one annotation, replacing the ones it overlaps
    fn save_annotation(&self, id: DocumentId, record: AnnotationRecord) -> Result<Annotation>;

    fn delete_annotation(&self, id: AnnotationId) -> Result<()>;

    /// Drop all annotations and the document-level record
    fn clear_annotations(&self, id: DocumentId) -> Result<()>;

    /// Returns `false` when an entry with the same text already exists
    fn insert_knowledge(&self, entry: KnowledgeEntry) -> Result<bool>;

    fn delete_knowledge(&self, text: &str) -> Result<()>;

    /// Returns the number of removed entries
    fn clear_knowledge(&self) -> Result<usize>;

    /// Knowledge entries in insertion order
    fn knowledge_entries(&self) -> Result<Vec<KnowledgeEntry>>;

    /// Rewrite persisted history in its shortest form. Stores that keep no
    /// history have nothing to do.
    fn compact(&self) -> Result<()>;

    fn knowledge_snapshot(&self) -> Result<KnowledgeSnapshot> {
        Ok(KnowledgeSnapshot::from_entries(&self.knowledge_entries()?))
    }

    fn stats(&self) -> Result<AnnotationStats> {
        let documents = self.documents()?;
        let mut annotations = Vec::new();
        for document in &documents {
            annotations.extend(self.annotations(document.id)?);
        }
        Ok(AnnotationStats::collect(documents.len(), &annotations))
    }
}

/// A state holder that serializes mutations.
///
/// Implementors get [`AnnotationStore`] for free: requests are planned
/// against the current state, and only the resulting event is committed.
pub trait StateLog: Send + Sync {
    fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R;

    /// Plan and commit under one exclusive section. A `None` event leaves
    /// the state untouched.
    fn transact<T>(
        &self,
        f: impl FnOnce(&StoreState) -> Result<(Option<StoreEvent>, T)>,
    ) -> Result<T>;

    fn compact_log(&self) -> Result<()> {
        Ok(())
    }
}

impl<L: StateLog> AnnotationStore for L {
    fn insert_document(&self, filename: &str, content: &str) -> Result<Document> {
        self.transact(|state| {
            let (event, document) = state.plan_insert_document(filename, content);
            Ok((Some(event), document))
        })
    }

    fn document(&self, id: DocumentId) -> Result<Document> {
        self.read(|state| state.stored(id).map(|s| s.document.clone()))
    }

    fn documents(&self) -> Result<Vec<Document>> {
        let mut documents: Vec<Document> =
            self.read(|state| state.documents().map(|s| s.document.clone()).collect());
        documents.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        Ok(documents)
    }

    fn delete_document(&self, id: DocumentId) -> Result<()> {
        self.transact(|state| Ok((Some(state.plan_delete_document(id)?), ())))
    }

    fn set_status(&self, id: DocumentId, status: DocumentStatus) -> Result<()> {
        self.transact(|state| Ok((Some(state.plan_set_status(id, status)?), ())))
    }

    fn annotations(&self, id: DocumentId) -> Result<Vec<Annotation>> {
        self.read(|state| state.stored(id).map(|s| s.annotations.clone()))
    }

    fn document_annotation(&self, id: DocumentId) -> Result<Option<DocumentAnnotation>> {
        self.read(|state| state.stored(id).map(|s| s.summary.clone()))
    }

    fn replace_annotations(
        &self,
        id: DocumentId,
        records: Vec<AnnotationRecord>,
        summary: Option<DocumentAnnotation>,
    ) -> Result<Vec<Annotation>> {
        self.transact(|state| {
            let (event, annotations) = state.plan_replace_annotations(id, records, summary)?;
            Ok((Some(event), annotations))
        })
    }

    fn save_annotation(&self, id: DocumentId, record: AnnotationRecord) -> Result<Annotation> {
        self.transact(|state| {
            let (event, annotation) = state.plan_save_annotation(id, record)?;
            Ok((Some(event), annotation))
        })
    }

    fn delete_annotation(&self, id: AnnotationId) -> Result<()> {
        self.transact(|state| Ok((Some(state.plan_delete_annotation(id)?), ())))
    }

    fn clear_annotations(&self, id: DocumentId) -> Result<()> {
        self.transact(|state| Ok((Some(state.plan_clear_annotations(id)?), ())))
    }

    fn insert_knowledge(&self, entry: KnowledgeEntry) -> Result<bool> {
        if entry.text.trim().is_empty() {
            return Err(Error::invalid_input("knowledge entry text is empty"));
        }
        self.transact(|state| {
            let event = state.plan_insert_knowledge(entry);
            let inserted = event.is_some();
            Ok((event, inserted))
        })
    }

    fn delete_knowledge(&self, text: &str) -> Result<()> {
        self.transact(|state| Ok((Some(state.plan_delete_knowledge(text)?), ())))
    }

    fn clear_knowledge(&self) -> Result<usize> {
        self.transact(|state| {
            let count = state.knowledge().len();
            let event = (count > 0).then_some(StoreEvent::KnowledgeCleared);
            Ok((event, count))
        })
    }

    fn knowledge_entries(&self) -> Result<Vec<KnowledgeEntry>> {
        Ok(self.read(|state| state.knowledge().to_vec()))
    }

    fn compact(&self) -> Result<()> {
        self.compact_log()
    }

    fn stats(&self) -> Result<AnnotationStats> {
        Ok(self.read(|state| {
            let annotations: Vec<Annotation> = state
                .documents()
                .flat_map(|s| s.annotations.iter().cloned())
                .collect();
            AnnotationStats::collect(state.document_count(), &annotations)
        }))
    }
}
