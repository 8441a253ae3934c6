//! Subcommand handlers

use crate::cli::{Command, DocCommand, KbCommand};
use crate::config::AppConfig;
use annotext_classifiers::{LexiconScorer, LexiconTokenizer};
use annotext_core::{KnowledgeSource, Tokenizer};
use annotext_engine::{AnnotationPipeline, AnnotationService};
use annotext_store::JournalStore;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Open the store and build the pipeline described by `config`
pub fn build_service(config: &AppConfig) -> Result<AnnotationService> {
    let tokenizer: Arc<dyn Tokenizer> = match &config.lexicon_path {
        Some(path) => Arc::new(
            LexiconTokenizer::from_file(path)
                .with_context(|| format!("Failed to load lexicon {:?}", path))?,
        ),
        None => Arc::new(LexiconTokenizer::builtin()?),
    };
    let scorer = Arc::new(LexiconScorer::new()?);

    let pipeline = AnnotationPipeline::new(&config.annotator, tokenizer, scorer)?;
    let store = JournalStore::open(&config.store_path)
        .with_context(|| format!("Failed to open store {:?}", config.store_path))?;

    Ok(AnnotationService::new(Arc::new(store), pipeline))
}

pub fn run(service: &AnnotationService, command: Command) -> Result<()> {
    match command {
        Command::Doc(cmd) => run_doc(service, cmd),
        Command::Annotate { id } => print_json(&service.auto_annotate(id)?),
        Command::Label {
            id,
            start,
            end,
            label,
        } => {
            let annotation = service.save_annotation(id, start, end, label)?;
            println!(
                "annotation {} [{}, {}) {} \"{}\"",
                annotation.id, start, end, label, annotation.record.selected_text
            );
            Ok(())
        }
        Command::Unlabel { annotation_id } => {
            service.delete_annotation(annotation_id)?;
            println!("deleted annotation {}", annotation_id);
            Ok(())
        }
        Command::Clear { id } => {
            service.clear_annotations(id)?;
            println!("cleared annotations of document {}", id);
            Ok(())
        }
        Command::Segments { id } => {
            for segment in service.segments(id)? {
                let span = segment
                    .span
                    .map(|(s, e)| format!("[{s}, {e})"))
                    .unwrap_or_else(|| "-".to_string());
                let label = segment.label.map(|l| l.to_string()).unwrap_or_default();
                println!(
                    "{:>4}  {:<12} {:<4} {:<8} {:<10} {}",
                    segment.index, segment.text, segment.tag, segment.pos_name, span, label
                );
            }
            Ok(())
        }
        Command::Kb(cmd) => run_kb(service, cmd),
        Command::Stats => print_json(&service.stats()?),
        Command::Compact => {
            service.compact_store()?;
            println!("store compacted");
            Ok(())
        }
    }
}

fn run_doc(service: &AnnotationService, command: DocCommand) -> Result<()> {
    match command {
        DocCommand::Add { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?} as UTF-8 text", file))?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            let document = service.add_document(&filename, &content)?;
            println!("added document {} ({})", document.id, document.filename);
        }
        DocCommand::New { name, text } => {
            let document = service.new_document(&name, &text)?;
            println!("added document {} ({})", document.id, document.filename);
        }
        DocCommand::List => {
            for document in service.documents()? {
                println!(
                    "{:>4}  {:<12} {}  {}",
                    document.id,
                    document.status.as_str(),
                    document.uploaded_at.format("%Y-%m-%d %H:%M:%S"),
                    document.filename
                );
            }
        }
        DocCommand::Show { id } => {
            #[derive(Serialize)]
            struct Shown {
                document: annotext_core::Document,
                annotations: Vec<annotext_core::Annotation>,
                #[serde(skip_serializing_if = "Option::is_none")]
                summary: Option<annotext_core::DocumentAnnotation>,
            }

            let shown = Shown {
                document: service.document(id)?,
                annotations: service.annotations(id)?,
                summary: service.annotation_set(id)?.document,
            };
            print_json(&shown)?;
        }
        DocCommand::Delete { id } => {
            service.delete_document(id)?;
            println!("deleted document {}", id);
        }
        DocCommand::Complete { id } => {
            service.mark_complete(id)?;
            println!("document {} completed", id);
        }
    }
    Ok(())
}

fn run_kb(service: &AnnotationService, command: KbCommand) -> Result<()> {
    match command {
        KbCommand::List => {
            let entries = service.knowledge_entries()?;
            for entry in &entries {
                println!(
                    "{:<16} {:<14} {}",
                    entry.text,
                    entry.label.as_str(),
                    entry.source
                );
            }
            println!("{} entries", entries.len());
        }
        KbCommand::Add { text, label } => {
            let text = text.trim();
            if service.promote_to_knowledge_base(text, label, KnowledgeSource::Manual)? {
                println!("added '{}' as {}", text, label);
            } else {
                println!("'{}' is already known (or label none)", text);
            }
        }
        KbCommand::Remove { text } => {
            service.delete_knowledge(&text)?;
            println!("removed '{}'", text);
        }
        KbCommand::Clear => {
            println!("removed {} entries", service.clear_knowledge()?);
        }
        KbCommand::Export { out } => {
            let json = service.export_knowledge()?.to_json()?;
            match out {
                Some(path) => {
                    write_file(&path, &json)?;
                    println!("exported to {:?}", path);
                }
                None => println!("{}", json),
            }
        }
        KbCommand::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let imported = service.import_knowledge(&json)?;
            println!("imported {} entries", imported);
        }
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}
