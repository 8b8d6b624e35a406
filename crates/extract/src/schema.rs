use classify::ConceptWeights;
use serde::{Deserialize, Serialize};

/// Entity type tag for frequency-extracted terms. Richer kind inference
/// would come in behind a pluggable enricher, not inline string matching.
pub const ENTITY_TYPE_TERM: &str = "term";

/// Fixed relevance weight recorded on every mention.
pub const MENTION_WEIGHT: f64 = 1.0;

/// Opaque reference to an externally supplied embedding vector. Only the
/// handle is stored; vector contents are never inspected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingHandle {
    /// Collaborator-defined key locating the vector.
    pub vector_ref: String,
    /// Identifier of the encoder that produced it.
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    /// Case-folded canonical label; the document-scoped uniqueness key.
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub concept_weights: ConceptWeights,
    pub embedding: Option<EmbeddingHandle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub sentence_id: String,
    pub entity_id: String,
    /// Surface text as it appeared in the sentence.
    pub surface: String,
    /// The entity's dominant concept key, captured once when the mention
    /// was created.
    pub dominant_concept: String,
    pub weight: f64,
}
