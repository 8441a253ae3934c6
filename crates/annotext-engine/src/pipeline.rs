//! Annotation pipeline: tokens, candidates, merge, document record

use crate::merger::SpanMerger;
use annotext_classifiers::{
    AnnotatorConfig, DocumentClassifier, HeuristicClassifier, KnowledgeMatcher, SentimentScorer,
    TemporalMatcher,
};
use annotext_core::{AnnotationRecord, AnnotationSet, KnowledgeSnapshot, Result, TokenStream, Tokenizer};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// One configured annotator.
///
/// Holds no per-run state; `annotate` is a pure function of the text, the
/// knowledge snapshot, and the collaborators' outputs.
pub struct AnnotationPipeline {
    tokenizer: Arc<dyn Tokenizer>,
    scorer: Arc<dyn SentimentScorer>,
    knowledge: KnowledgeMatcher,
    heuristic: HeuristicClassifier,
    temporal: TemporalMatcher,
    document: DocumentClassifier,
}

impl AnnotationPipeline {
    pub fn new(
        config: &AnnotatorConfig,
        tokenizer: Arc<dyn Tokenizer>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Result<Self> {
        config.validate()?;

        info!(
            "Annotation pipeline ready: tokenizer={}, scorer={}, {} temporal patterns",
            tokenizer.name(),
            scorer.name(),
            config.temporal.patterns.len()
        );

        Ok(Self {
            tokenizer,
            scorer,
            knowledge: KnowledgeMatcher::new(),
            heuristic: HeuristicClassifier::new(config.sentiment.clone()),
            temporal: TemporalMatcher::new(&config.temporal)?,
            document: DocumentClassifier::new(config)?,
        })
    }

    pub fn tokenize(&self, text: &str) -> TokenStream {
        let stream = TokenStream::from_tokenizer(self.tokenizer.as_ref(), text);
        if stream.misaligned_count() > 0 {
            warn!(
                "{} of {} tokens could not be located in the text",
                stream.misaligned_count(),
                stream.len()
            );
        }
        stream
    }

    /// Non-overlapping spans, knowledge base first, then heuristics, then
    /// temporal patterns
    pub fn merge_spans(
        &self,
        text: &str,
        stream: &TokenStream,
        snapshot: &KnowledgeSnapshot,
    ) -> Vec<AnnotationRecord> {
        let mut merger = SpanMerger::new();
        merger.offer_all(self.knowledge.candidates(text, snapshot));
        merger.offer_all(
            self.heuristic
                .candidates(stream, snapshot, self.scorer.as_ref()),
        );
        merger.offer_all(self.temporal.candidates(text));
        merger.finish()
    }

    /// Full run over one text
    pub fn annotate(&self, text: &str, snapshot: &KnowledgeSnapshot) -> AnnotationSet {
        let start = Instant::now();

        let stream = self.tokenize(text);
        let annotations = self.merge_spans(text, &stream, snapshot);
        let document = self.document.classify(text, self.scorer.as_ref());

        let elapsed = start.elapsed();
        metrics::counter!("annotext_runs_total").increment(1);
        metrics::histogram!("annotext_annotate_latency_us").record(elapsed.as_micros() as f64);

        info!(
            "Annotated {} chars: {} spans, category={}, sentiment={} in {:?}",
            text.chars().count(),
            annotations.len(),
            document.category,
            document.sentiment,
            elapsed
        );

        AnnotationSet {
            annotations,
            document: Some(document),
        }
    }
}
