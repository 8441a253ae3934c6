//! Storage for annotext
//!
//! Defines the [`AnnotationStore`] collaborator and two implementations
//! sharing one event-sourced state: [`MemoryStore`] and the JSON-lines
//! [`JournalStore`].

pub mod export;
pub mod journal;
pub mod memory;
pub mod state;
pub mod stats;
pub mod store;

pub use export::{parse_import, ExportedEntity, KnowledgeExport};
pub use journal::JournalStore;
pub use memory::MemoryStore;
pub use state::{StoreEvent, StoreState, StoredDocument};
pub use stats::{AnnotationStats, LabelCount};
pub use store::{AnnotationStore, StateLog};
