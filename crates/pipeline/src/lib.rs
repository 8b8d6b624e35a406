pub mod batch;
pub mod config;
pub mod embedding;
pub mod metrics;

pub use batch::{BatchDriver, BatchSummary};
pub use config::{BatchConfig, IdConfig, PipelineConfig};
pub use embedding::EmbeddingProvider;
pub use metrics::{MetricsSnapshot, PipelineMetrics};

use anyhow::{Context, Result};
use artifact::{CreationScript, DocumentMeta, DocumentRecord, SegmentRecord, SentenceRecord};
use chrono::Utc;
use classify::Classifier;
use extract::{EmbeddingHandle, EntityRegistry};
use ident::{IdAllocator, IdKind};
use ingest::{Segmenter, SegmenterConfig};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One document to ingest: raw text plus optional pre-supplied embedding
/// handles (sentences keyed by global ordinal, entities by case-folded
/// label). Handles are pass-through; their vectors are never inspected.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub title: String,
    pub source: String,
    pub text: String,
    pub sentence_embeddings: HashMap<usize, EmbeddingHandle>,
    pub entity_embeddings: HashMap<String, EmbeddingHandle>,
}

impl DocumentInput {
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            text: text.into(),
            sentence_embeddings: HashMap::new(),
            entity_embeddings: HashMap::new(),
        }
    }
}

/// Everything one ingestion run produces.
pub struct IngestOutcome {
    pub record: DocumentRecord,
    pub script: CreationScript,
    /// Classification stages that fell back to the uniform distribution.
    pub fallbacks: Vec<String>,
}

/// The single-document ingestion pipeline: fingerprint, segment, allocate
/// IDs and register entities sentence-by-sentence in order, classify the
/// whole document, then assemble the validated artifacts.
pub struct Pipeline {
    config: PipelineConfig,
    segmenter: Segmenter,
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let segmenter = Segmenter::new(SegmenterConfig {
            window_size: config.segment_window,
            ..SegmenterConfig::default()
        });
        Self {
            config,
            segmenter,
            classifier: Classifier::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Ingest one document. Each call scopes its own allocator, so
    /// documents in a batch get independent counter namespaces.
    pub async fn ingest_document(&self, input: &DocumentInput) -> Result<IngestOutcome> {
        self.run(input, None).await
    }

    /// Ingest and let `provider` fill in embedding handles for sentences
    /// and entities that arrived without one.
    pub async fn ingest_document_with_provider(
        &self,
        input: &DocumentInput,
        provider: &dyn EmbeddingProvider,
    ) -> Result<IngestOutcome> {
        self.run(input, Some(provider)).await
    }

    /// Read one .txt/.md file and ingest it; the file stem becomes the
    /// title and the path the source.
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestOutcome> {
        let text = ingest::FileReader::read_file(path).await?;
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();
        let input = DocumentInput::new(title, path.to_string_lossy(), text);
        self.ingest_document(&input).await
    }

    async fn run(
        &self,
        input: &DocumentInput,
        provider: Option<&dyn EmbeddingProvider>,
    ) -> Result<IngestOutcome> {
        let allocator = Arc::new(IdAllocator::new(self.config.ids.to_mode()));

        // Parent context: title + source path uniquely describe the document
        let doc_context = format!("{}:{}", input.title, input.source);

        let segmentation = self
            .segmenter
            .segment(&input.text)
            .context("Segmentation failed")?;

        let document_id = allocator
            .allocate(IdKind::Document, &doc_context)
            .context("Failed to allocate document id")?;

        let mut registry = EntityRegistry::new(doc_context.as_str(), allocator.clone())
            .with_embeddings(input.entity_embeddings.clone());

        // Sentences go through strictly in order: registry writes are
        // order-sensitive (first occurrence wins).
        let mut segments = Vec::with_capacity(segmentation.windows.len());
        let mut sentences = Vec::with_capacity(segmentation.sentences.len());

        for (segment_ordinal, window) in segmentation.windows.iter().enumerate() {
            let segment_id = allocator
                .allocate(IdKind::Segment, &doc_context)
                .context("Failed to allocate segment id")?;
            let sentence_context = format!("{}_seg{}", document_id, segment_ordinal);

            let mut member_ids = Vec::with_capacity(window.len());
            for &sentence_ordinal in window {
                let text = &segmentation.sentences[sentence_ordinal];
                let sentence_id = allocator
                    .allocate(IdKind::Sentence, &sentence_context)
                    .context("Failed to allocate sentence id")?;

                registry.register_sentence(
                    &sentence_id,
                    text,
                    self.config.max_terms_per_sentence,
                )?;

                sentences.push(SentenceRecord {
                    id: sentence_id.clone(),
                    ordinal: sentence_ordinal,
                    concept_weights: self
                        .classifier
                        .concept_weights(text, &extract::tokenize(text)),
                    embedding: input.sentence_embeddings.get(&sentence_ordinal).cloned(),
                });
                member_ids.push(sentence_id);
            }

            // Segment key terms come from the window's joined text
            let joined = window
                .iter()
                .map(|&i| segmentation.sentences[i].as_str())
                .collect::<Vec<_>>()
                .join(" ");

            segments.push(SegmentRecord {
                id: segment_id,
                ordinal: segment_ordinal,
                key_terms: extract::extract_terms(&joined, self.config.max_terms_per_sentence),
                sentence_ids: member_ids,
            });
        }

        // Whole-document classification runs once
        let classification = self
            .classifier
            .classify(&input.text, &extract::tokenize(&input.text));
        for stage in &classification.fallbacks {
            info!(
                stage = %stage,
                title = %input.title,
                "classification fell back to the uniform distribution"
            );
        }

        let (mut entities, mentions) = registry.into_parts();

        if let Some(provider) = provider {
            for sentence in sentences.iter_mut() {
                if sentence.embedding.is_none() {
                    let text = &segmentation.sentences[sentence.ordinal];
                    sentence.embedding = Some(
                        provider
                            .embed(text)
                            .await
                            .context("Embedding provider failed for sentence")?,
                    );
                }
            }
            for entity in entities.iter_mut() {
                if entity.embedding.is_none() {
                    entity.embedding = Some(
                        provider
                            .embed(&entity.label)
                            .await
                            .context("Embedding provider failed for entity")?,
                    );
                }
            }
        }

        let meta = DocumentMeta {
            id: document_id,
            title: input.title.clone(),
            fingerprint: ingest::fingerprint(input.text.as_bytes()),
            ingested_at: Utc::now(),
            token_hint: ingest::estimate_tokens(&input.text),
            subject_top: classification.subject.clone(),
            genre_top: classification.genre.clone(),
        };

        let (record, script) = artifact::build(meta, segments, sentences, entities, mentions)
            .context("Artifact assembly failed")?;

        Ok(IngestOutcome {
            record,
            script,
            fallbacks: classification.fallbacks,
        })
    }
}
