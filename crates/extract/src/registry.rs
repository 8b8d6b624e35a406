use crate::keywords;
use crate::schema::{EmbeddingHandle, Entity, ENTITY_TYPE_TERM, MENTION_WEIGHT, Mention};
use crate::tokenizer::{case_fold, tokenize};
use anyhow::{Context, Result};
use classify::Classifier;
use ident::IdAllocator;
use std::collections::HashMap;
use std::sync::Arc;

/// Document-scoped entity registry.
///
/// The case-folded label is the uniqueness key: the first occurrence wins,
/// allocates the canonical entity, and later occurrences of the same label
/// reuse its identifier. Entities are immutable once created. Registration
/// is order-sensitive, so one document's sentences go through strictly in
/// order.
pub struct EntityRegistry {
    context: String,
    allocator: Arc<IdAllocator>,
    classifier: Classifier,
    by_label: HashMap<String, usize>,
    entities: Vec<Entity>,
    mentions: Vec<Mention>,
    embedding_handles: HashMap<String, EmbeddingHandle>,
}

impl EntityRegistry {
    pub fn new(context: impl Into<String>, allocator: Arc<IdAllocator>) -> Self {
        Self {
            context: context.into(),
            allocator,
            classifier: Classifier::new(),
            by_label: HashMap::new(),
            entities: Vec::new(),
            mentions: Vec::new(),
            embedding_handles: HashMap::new(),
        }
    }

    /// Pre-supplied embedding handles, keyed by case-folded label. Attached
    /// to matching entities as they are created.
    pub fn with_embeddings(mut self, handles: HashMap<String, EmbeddingHandle>) -> Self {
        self.embedding_handles = handles;
        self
    }

    /// Register one term occurrence and record its mention. Returns the
    /// canonical entity ID for the term's case-folded label.
    pub fn register(&mut self, sentence_id: &str, surface: &str) -> Result<String> {
        let label = case_fold(surface);

        let idx = match self.by_label.get(&label) {
            Some(&idx) => idx,
            None => {
                let id = self
                    .allocator
                    .allocate_entity(&self.context, ENTITY_TYPE_TERM)
                    .context("Failed to allocate entity id")?;

                // Concept weights at entity granularity: the term's own
                // short text is the classifier input.
                let concept_weights =
                    self.classifier.concept_weights(surface, &tokenize(surface));

                let idx = self.entities.len();
                self.entities.push(Entity {
                    id,
                    label: label.clone(),
                    entity_type: ENTITY_TYPE_TERM.to_string(),
                    concept_weights,
                    embedding: self.embedding_handles.get(&label).cloned(),
                });
                self.by_label.insert(label, idx);
                idx
            }
        };

        let entity = &self.entities[idx];
        self.mentions.push(Mention {
            sentence_id: sentence_id.to_string(),
            entity_id: entity.id.clone(),
            surface: surface.to_string(),
            dominant_concept: entity.concept_weights.dominant_key().to_string(),
            weight: MENTION_WEIGHT,
        });

        Ok(entity.id.clone())
    }

    /// Extract up to `max_terms` salient terms from one sentence and
    /// register each of them.
    pub fn register_sentence(
        &mut self,
        sentence_id: &str,
        sentence: &str,
        max_terms: usize,
    ) -> Result<Vec<String>> {
        let mut entity_ids = Vec::new();
        for term in keywords::extract_terms(sentence, max_terms) {
            entity_ids.push(self.register(sentence_id, &term)?);
        }
        Ok(entity_ids)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    pub fn into_parts(self) -> (Vec<Entity>, Vec<Mention>) {
        (self.entities, self.mentions)
    }
}
