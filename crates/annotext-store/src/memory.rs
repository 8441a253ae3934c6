//! In-memory store

use crate::state::{StoreEvent, StoreState};
use crate::store::StateLog;
use annotext_core::Result;
use parking_lot::RwLock;

/// Store that keeps everything in process memory
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateLog for MemoryStore {
    fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&*self.state.read())
    }

    fn transact<T>(
        &self,
        f: impl FnOnce(&StoreState) -> Result<(Option<StoreEvent>, T)>,
    ) -> Result<T> {
        let mut state = self.state.write();
        let (event, value) = f(&*state)?;
        if let Some(event) = event {
            state.apply(&event);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnnotationStore;
    use annotext_core::{
        AnnotationRecord, DocumentStatus, KnowledgeEntry, KnowledgeSource, Label, Span,
    };

    #[test]
    fn test_document_lifecycle() {
        let store = MemoryStore::new();
        let a = store.insert_document("a.txt", "张三").unwrap();
        let b = store.insert_document("b.txt", "北京").unwrap();
        assert_eq!(a.status, DocumentStatus::NotStarted);

        let listed: Vec<u64> = store.documents().unwrap().iter().map(|d| d.id).collect();
        assert_eq!(listed, vec![b.id, a.id]);

        store.set_status(a.id, DocumentStatus::Completed).unwrap();
        assert_eq!(store.document(a.id).unwrap().status, DocumentStatus::Completed);

        store.delete_document(a.id).unwrap();
        assert!(store.document(a.id).unwrap_err().is_not_found());
        assert!(store.delete_document(a.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_knowledge_first_writer_wins() {
        let store = MemoryStore::new();
        assert!(store
            .insert_knowledge(KnowledgeEntry::new("北京", Label::Place, KnowledgeSource::Manual))
            .unwrap());
        assert!(!store
            .insert_knowledge(KnowledgeEntry::new("北京", Label::Organization, KnowledgeSource::Manual))
            .unwrap());
        assert!(store
            .insert_knowledge(KnowledgeEntry::new("  ", Label::Place, KnowledgeSource::Manual))
            .is_err());

        let snapshot = store.knowledge_snapshot().unwrap();
        assert_eq!(snapshot.label("北京"), Some(Label::Place));

        assert_eq!(store.clear_knowledge().unwrap(), 1);
        assert_eq!(store.clear_knowledge().unwrap(), 0);
        assert!(store.delete_knowledge("北京").unwrap_err().is_not_found());
    }

    #[test]
    fn test_annotations_sorted_and_deletable() {
        let store = MemoryStore::new();
        let doc = store.insert_document("a.txt", "张三去了北京").unwrap();

        let saved = store
            .replace_annotations(
                doc.id,
                vec![
                    AnnotationRecord::from_span(&Span::new(4, 6, Label::Place), "北京"),
                    AnnotationRecord::from_span(&Span::new(0, 2, Label::Person), "张三"),
                ],
                None,
            )
            .unwrap();
        assert_eq!(saved[0].record.selected_text, "张三");

        store.delete_annotation(saved[0].id).unwrap();
        let left = store.annotations(doc.id).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].record.selected_text, "北京");

        store.clear_annotations(doc.id).unwrap();
        assert!(store.annotations(doc.id).unwrap().is_empty());
        assert!(store.delete_annotation(saved[1].id).unwrap_err().is_not_found());
    }
}
