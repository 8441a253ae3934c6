//! Append-only JSON-lines journal
//!
//! Each committed [`StoreEvent`] is written as one line. Opening a journal
//! replays it; lines that fail to parse are skipped with a warning so a torn
//! final write does not lose the rest of the file.

use crate::state::{StoreEvent, StoreState};
use crate::store::StateLog;
use annotext_core::{Error, Result};
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

struct Journal {
    state: StoreState,
    writer: BufWriter<File>,
}

/// Store persisted as a journal of events
pub struct JournalStore {
    path: PathBuf,
    inner: RwLock<Journal>,
}

impl JournalStore {
    /// Open (or create) the journal at `path` and replay it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let state = if path.exists() {
            Self::replay(&path)?
        } else {
            StoreState::new()
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            inner: RwLock::new(Journal {
                state,
                writer: BufWriter::new(file),
            }),
        })
    }

    fn replay(path: &Path) -> Result<StoreState> {
        let reader = BufReader::new(File::open(path)?);
        let mut state = StoreState::new();
        let mut applied = 0usize;
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<StoreEvent>(&line) {
                Ok(event) => {
                    state.apply(&event);
                    applied += 1;
                }
                Err(e) => {
                    warn!("Skipping journal line {} in {:?}: {}", line_no + 1, path, e);
                    skipped += 1;
                }
            }
        }

        info!(
            "Replayed {} journal events from {:?} ({} skipped): {} documents, {} knowledge entries",
            applied,
            path,
            skipped,
            state.document_count(),
            state.knowledge().len()
        );
        Ok(state)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the journal as the minimal event sequence for the current
    /// state. The new file replaces the old one atomically.
    pub fn compact(&self) -> Result<()> {
        let mut journal = self.inner.write();
        journal.writer.flush()?;

        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let mut out = BufWriter::new(File::create(&tmp)?);
            for event in journal.state.to_events() {
                serde_json::to_writer(&mut out, &event)?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        journal.writer = BufWriter::new(file);
        info!("Compacted journal {:?}", self.path);
        Ok(())
    }
}

impl StateLog for JournalStore {
    fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.inner.read().state)
    }

    fn transact<T>(
        &self,
        f: impl FnOnce(&StoreState) -> Result<(Option<StoreEvent>, T)>,
    ) -> Result<T> {
        let mut journal = self.inner.write();
        let (event, value) = f(&journal.state)?;

        if let Some(event) = event {
            let line = serde_json::to_string(&event)?;
            append_line(&mut journal.writer, &line).map_err(|e| {
                Error::storage(format!("failed to append to {:?}: {}", self.path, e))
            })?;
            debug!("Journaled event to {:?}", self.path);
            journal.state.apply(&event);
        }

        Ok(value)
    }

    fn compact_log(&self) -> Result<()> {
        JournalStore::compact(self)
    }
}

fn append_line(writer: &mut BufWriter<File>, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnnotationStore;
    use annotext_core::{
        AnnotationRecord, DocumentStatus, KnowledgeEntry, KnowledgeSource, Label, Span,
    };
    use tempfile::TempDir;

    fn populate(store: &JournalStore) -> u64 {
        let doc = store.insert_document("a.txt", "张三去了北京").unwrap();
        store
            .replace_annotations(
                doc.id,
                vec![AnnotationRecord::from_span(&Span::new(0, 2, Label::Person), "张三")],
                None,
            )
            .unwrap();
        store
            .save_annotation(
                doc.id,
                AnnotationRecord::from_span(&Span::new(4, 6, Label::Place), "北京"),
            )
            .unwrap();
        store.set_status(doc.id, DocumentStatus::InProgress).unwrap();
        store
            .insert_knowledge(KnowledgeEntry::new("北京", Label::Place, KnowledgeSource::Manual))
            .unwrap();
        doc.id
    }

    #[test]
    fn test_reopen_restores_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.jsonl");

        let id = {
            let store = JournalStore::open(&path).unwrap();
            populate(&store)
        };

        let store = JournalStore::open(&path).unwrap();
        let doc = store.document(id).unwrap();
        assert_eq!(doc.status, DocumentStatus::InProgress);
        assert_eq!(store.annotations(id).unwrap().len(), 2);
        assert!(store.knowledge_snapshot().unwrap().contains("北京"));

        // ids keep counting after replay
        let next = store.insert_document("b.txt", "上海").unwrap();
        assert_eq!(next.id, id + 1);
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.jsonl");

        {
            let store = JournalStore::open(&path).unwrap();
            populate(&store);
        }
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{{\"event\":\"document_del").unwrap();
        }

        let store = JournalStore::open(&path).unwrap();
        assert_eq!(store.documents().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_request_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.jsonl");
        let store = JournalStore::open(&path).unwrap();

        assert!(store.delete_document(42).is_err());
        assert!(store
            .insert_knowledge(KnowledgeEntry::new("x", Label::Place, KnowledgeSource::Manual))
            .unwrap());
        assert!(!store
            .insert_knowledge(KnowledgeEntry::new("x", Label::Person, KnowledgeSource::Manual))
            .unwrap());

        let lines = std::fs::read_to_string(&path).unwrap();
        assert_eq!(lines.lines().count(), 1);
    }

    #[test]
    fn test_compact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.jsonl");
        let store = JournalStore::open(&path).unwrap();
        let id = populate(&store);
        store.delete_knowledge("北京").unwrap();

        let before = std::fs::read_to_string(&path).unwrap().lines().count();
        store.compact().unwrap();
        let after = std::fs::read_to_string(&path).unwrap().lines().count();
        assert!(after < before);

        store.clear_annotations(id).unwrap();
        drop(store);

        let reopened = JournalStore::open(&path).unwrap();
        assert!(reopened.annotations(id).unwrap().is_empty());
        assert!(reopened.knowledge_entries().unwrap().is_empty());
        assert_eq!(reopened.document(id).unwrap().status, DocumentStatus::InProgress);
    }

    #[test]
    fn test_compact_does_not_reissue_deleted_ids() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.jsonl");

        {
            let store = JournalStore::open(&path).unwrap();
            let first = store.insert_document("a.txt", "北京").unwrap();
            let second = store.insert_document("b.txt", "上海").unwrap();
            let kept = store
                .save_annotation(
                    first.id,
                    AnnotationRecord::from_span(&Span::new(0, 2, Label::Place), "北京"),
                )
                .unwrap();
            let dropped = store
                .save_annotation(
                    second.id,
                    AnnotationRecord::from_span(&Span::new(0, 2, Label::Place), "上海"),
                )
                .unwrap();
            assert!(dropped.id > kept.id);
            store.delete_document(second.id).unwrap();
            store.compact().unwrap();
        }

        let store = JournalStore::open(&path).unwrap();
        let next = store.insert_document("c.txt", "广州").unwrap();
        assert_eq!(next.id, 3);
        let annotation = store
            .save_annotation(
                next.id,
                AnnotationRecord::from_span(&Span::new(0, 2, Label::Place), "广州"),
            )
            .unwrap();
        assert_eq!(annotation.id, 3);
        assert!(store.delete_annotation(2).unwrap_err().is_not_found());
    }
}
