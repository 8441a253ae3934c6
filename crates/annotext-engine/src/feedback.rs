//! Knowledge-base feedback loop

use annotext_core::{Error, KnowledgeEntry, KnowledgeSource, Label, Result};
use annotext_store::AnnotationStore;
use tracing::{debug, info};

/// Promote a confirmed `(text, label)` pair into the knowledge base.
///
/// Inserts only when no entry with the same text exists; an existing label
/// is never overwritten. Returns whether an entry was inserted. `none`
/// labels are never promoted. The text is stored exactly as given.
pub fn promote(
    store: &dyn AnnotationStore,
    text: &str,
    label: Label,
    source: KnowledgeSource,
) -> Result<bool> {
    if text.trim().is_empty() {
        return Err(Error::invalid_input("cannot promote empty text"));
    }
    if label == Label::None {
        debug!(text, "label none is not promoted");
        return Ok(false);
    }

    let inserted = store.insert_knowledge(KnowledgeEntry::new(text, label, source))?;
    let outcome = if inserted { "inserted" } else { "exists" };
    metrics::counter!("annotext_promotions_total", "source" => source.as_str(), "outcome" => outcome)
        .increment(1);

    if inserted {
        info!("Learned '{}' as {} ({})", text, label, source);
    } else {
        debug!(text, "already in knowledge base");
    }
    Ok(inserted)
}
