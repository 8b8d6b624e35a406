use chrono::{DateTime, Utc};
use classify::{CategoryScore, ConceptWeights};
use extract::{EmbeddingHandle, Entity, Mention};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub title: String,
    /// SHA-256 of the raw bytes. The raw text itself is not persisted.
    pub fingerprint: String,
    pub ingested_at: DateTime<Utc>,
    pub token_hint: usize,
    pub subject_top: Vec<CategoryScore>,
    pub genre_top: Vec<CategoryScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id: String,
    pub ordinal: usize,
    pub key_terms: Vec<String>,
    pub sentence_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub id: String,
    pub ordinal: usize,
    pub concept_weights: ConceptWeights,
    pub embedding: Option<EmbeddingHandle>,
}

/// The primary output artifact: document metadata plus the ordered
/// segment, sentence, entity and mention sequences of one ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document: DocumentMeta,
    pub segments: Vec<SegmentRecord>,
    pub sentences: Vec<SentenceRecord>,
    pub entities: Vec<Entity>,
    pub mentions: Vec<Mention>,
}
