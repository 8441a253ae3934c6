//! Behaviour shared by every store implementation

use annotext_core::{
    AnnotationRecord, DocumentAnnotation, DocumentStatus, KnowledgeEntry, KnowledgeSource, Label,
    SentimentBucket, Span,
};
use annotext_store::{AnnotationStore, JournalStore, MemoryStore};
use tempfile::TempDir;

fn record(start: usize, end: usize, text: &str, label: Label) -> AnnotationRecord {
    AnnotationRecord::from_span(&Span::new(start, end, label), text)
}

fn exercise(store: &dyn AnnotationStore) {
    let doc = store.insert_document("news.txt", "张三去了北京，天气很好。").unwrap();

    let summary = DocumentAnnotation {
        category: "other".to_string(),
        sentiment: SentimentBucket::Positive,
        score: 0.8,
    };
    store
        .replace_annotations(
            doc.id,
            vec![
                record(9, 11, "很好", Label::Sentiment),
                record(0, 2, "张三", Label::Person),
            ],
            Some(summary.clone()),
        )
        .unwrap();

    let starts: Vec<usize> = store
        .annotations(doc.id)
        .unwrap()
        .iter()
        .map(|a| a.record.start)
        .collect();
    assert_eq!(starts, vec![0, 9]);
    assert_eq!(store.document_annotation(doc.id).unwrap(), Some(summary));

    // replacing drops everything that was there before
    store
        .replace_annotations(doc.id, vec![record(4, 6, "北京", Label::Place)], None)
        .unwrap();
    let annotations = store.annotations(doc.id).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].record.selected_text, "北京");
    assert_eq!(store.document_annotation(doc.id).unwrap(), None);

    // out-of-range writes fail without a change
    assert!(store
        .replace_annotations(doc.id, vec![record(10, 40, "?", Label::Place)], None)
        .is_err());
    assert_eq!(store.annotations(doc.id).unwrap().len(), 1);

    assert!(store.replace_annotations(999, Vec::new(), None).unwrap_err().is_not_found());
    assert!(store
        .set_status(999, DocumentStatus::Completed)
        .unwrap_err()
        .is_not_found());

    for (text, label) in [("北京", Label::Place), ("张三", Label::Person), ("北京", Label::Time)] {
        store
            .insert_knowledge(KnowledgeEntry::new(text, label, KnowledgeSource::Auto))
            .unwrap();
    }
    let entries = store.knowledge_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "北京");
    assert_eq!(entries[0].label, Label::Place);

    let stats = store.stats().unwrap();
    assert_eq!(stats.total_documents, 1);
    assert_eq!(stats.total_annotations, 1);
    assert_eq!(stats.count(Label::Place), 1);

    store.delete_document(doc.id).unwrap();
    assert!(store.annotations(doc.id).unwrap_err().is_not_found());
    assert_eq!(store.stats().unwrap().total_annotations, 0);

    store.compact().unwrap();
    assert_eq!(store.knowledge_entries().unwrap().len(), 2);
    let next = store.insert_document("c.txt", "上海").unwrap();
    assert!(next.id > doc.id);
}

#[test]
fn memory_store_contract() {
    exercise(&MemoryStore::new());
}

#[test]
fn journal_store_contract() {
    let temp_dir = TempDir::new().unwrap();
    let store = JournalStore::open(temp_dir.path().join("nested/store.jsonl")).unwrap();
    exercise(&store);
}
