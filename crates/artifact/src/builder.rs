use crate::record::{DocumentMeta, DocumentRecord, SegmentRecord, SentenceRecord};
use crate::script::{CreationScript, Statement};
use extract::{Entity, Mention};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// An internal-consistency bug in the run, never recoverable. Artifact
/// emission halts rather than writing a partially valid file.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("sentence {id} belongs to {count} segments, expected exactly 1")]
    SentenceSegmentMembership { id: String, count: usize },
    #[error("segment {segment} lists unknown sentence {sentence}")]
    UnknownSegmentSentence { segment: String, sentence: String },
    #[error("mention references unknown sentence {0}")]
    UnknownMentionSentence(String),
    #[error("mention references unknown entity {0}")]
    UnknownMentionEntity(String),
    #[error("identifier {0} would be created twice")]
    DuplicateId(String),
}

/// Assemble the validated in-memory model into the document record and its
/// creation script. Referential integrity is checked before anything is
/// emitted.
pub fn build(
    document: DocumentMeta,
    segments: Vec<SegmentRecord>,
    sentences: Vec<SentenceRecord>,
    entities: Vec<Entity>,
    mentions: Vec<Mention>,
) -> Result<(DocumentRecord, CreationScript), IntegrityError> {
    validate(&document, &segments, &sentences, &entities, &mentions)?;

    let script = emit_script(&document, &segments, &sentences, &entities, &mentions);

    let record = DocumentRecord {
        document,
        segments,
        sentences,
        entities,
        mentions,
    };

    Ok((record, script))
}

fn validate(
    document: &DocumentMeta,
    segments: &[SegmentRecord],
    sentences: &[SentenceRecord],
    entities: &[Entity],
    mentions: &[Mention],
) -> Result<(), IntegrityError> {
    // No identifier may be emitted twice as a creation statement
    let mut created: HashSet<&str> = HashSet::new();
    let all_ids = std::iter::once(document.id.as_str())
        .chain(segments.iter().map(|s| s.id.as_str()))
        .chain(sentences.iter().map(|s| s.id.as_str()))
        .chain(entities.iter().map(|e| e.id.as_str()));
    for id in all_ids {
        if !created.insert(id) {
            return Err(IntegrityError::DuplicateId(id.to_string()));
        }
    }

    // Every sentence belongs to exactly one segment
    let sentence_ids: HashSet<&str> = sentences.iter().map(|s| s.id.as_str()).collect();
    let mut membership: HashMap<&str, usize> = HashMap::new();
    for segment in segments {
        for sentence_id in &segment.sentence_ids {
            if !sentence_ids.contains(sentence_id.as_str()) {
                return Err(IntegrityError::UnknownSegmentSentence {
                    segment: segment.id.clone(),
                    sentence: sentence_id.clone(),
                });
            }
            *membership.entry(sentence_id.as_str()).or_insert(0) += 1;
        }
    }
    for sentence in sentences {
        let count = membership.get(sentence.id.as_str()).copied().unwrap_or(0);
        if count != 1 {
            return Err(IntegrityError::SentenceSegmentMembership {
                id: sentence.id.clone(),
                count,
            });
        }
    }

    // Every mention references a sentence and an entity from this run
    let entity_ids: HashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    for mention in mentions {
        if !sentence_ids.contains(mention.sentence_id.as_str()) {
            return Err(IntegrityError::UnknownMentionSentence(
                mention.sentence_id.clone(),
            ));
        }
        if !entity_ids.contains(mention.entity_id.as_str()) {
            return Err(IntegrityError::UnknownMentionEntity(
                mention.entity_id.clone(),
            ));
        }
    }

    Ok(())
}

/// All node-creation statements first, then all relationship statements;
/// order and parameter naming are fixed so identical input produces an
/// identical script.
fn emit_script(
    document: &DocumentMeta,
    segments: &[SegmentRecord],
    sentences: &[SentenceRecord],
    entities: &[Entity],
    mentions: &[Mention],
) -> CreationScript {
    let mut script = CreationScript::default();

    script.push(
        Statement::new(
            "CREATE (d:Document {id: $id, title: $title, fingerprint: $fingerprint, \
             ingested_at: $ingested_at, token_hint: $token_hint})",
        )
        .param("id", document.id.as_str())
        .param("title", document.title.as_str())
        .param("fingerprint", document.fingerprint.as_str())
        .param("ingested_at", document.ingested_at.to_rfc3339())
        .param("token_hint", document.token_hint as u64),
    );

    for segment in segments {
        script.push(
            Statement::new("CREATE (s:Segment {id: $id, ordinal: $ordinal, key_terms: $key_terms})")
                .param("id", segment.id.as_str())
                .param("ordinal", segment.ordinal as u64)
                .param("key_terms", segment.key_terms.clone()),
        );
    }

    for sentence in sentences {
        let mut statement = Statement::new(
            "CREATE (s:Sentence {id: $id, ordinal: $ordinal, concept_weights: $concept_weights})",
        )
        .param("id", sentence.id.as_str())
        .param("ordinal", sentence.ordinal as u64)
        .param(
            "concept_weights",
            serde_json::to_value(&sentence.concept_weights).unwrap_or_default(),
        );
        if let Some(embedding) = &sentence.embedding {
            statement = statement
                .param("embedding_ref", embedding.vector_ref.as_str())
                .param("embedding_model", embedding.model.as_str());
        }
        script.push(statement);
    }

    for entity in entities {
        let mut statement = Statement::new(
            "CREATE (e:Entity {id: $id, label: $label, type: $type, \
             concept_weights: $concept_weights})",
        )
        .param("id", entity.id.as_str())
        .param("label", entity.label.as_str())
        .param("type", entity.entity_type.as_str())
        .param(
            "concept_weights",
            serde_json::to_value(&entity.concept_weights).unwrap_or_default(),
        );
        if let Some(embedding) = &entity.embedding {
            statement = statement
                .param("embedding_ref", embedding.vector_ref.as_str())
                .param("embedding_model", embedding.model.as_str());
        }
        script.push(statement);
    }

    // Relationships only after every node exists
    for segment in segments {
        script.push(
            Statement::new(
                "MATCH (d:Document {id: $from}) MATCH (s:Segment {id: $to}) \
                 CREATE (d)-[:HAS_SEGMENT {ordinal: $ordinal}]->(s)",
            )
            .param("from", document.id.as_str())
            .param("to", segment.id.as_str())
            .param("ordinal", segment.ordinal as u64),
        );
    }

    for segment in segments {
        for (position, sentence_id) in segment.sentence_ids.iter().enumerate() {
            script.push(
                Statement::new(
                    "MATCH (g:Segment {id: $from}) MATCH (s:Sentence {id: $to}) \
                     CREATE (g)-[:HAS_SENTENCE {position: $position}]->(s)",
                )
                .param("from", segment.id.as_str())
                .param("to", sentence_id.as_str())
                .param("position", position as u64),
            );
        }
    }

    for mention in mentions {
        script.push(
            Statement::new(
                "MATCH (s:Sentence {id: $from}) MATCH (e:Entity {id: $to}) \
                 CREATE (s)-[:MENTIONS {surface: $surface, concept: $concept, \
                 weight: $weight}]->(e)",
            )
            .param("from", mention.sentence_id.as_str())
            .param("to", mention.entity_id.as_str())
            .param("surface", mention.surface.as_str())
            .param("concept", mention.dominant_concept.as_str())
            .param("weight", mention.weight),
        );
    }

    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use classify::ConceptWeights;
    use serde_json::Value;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            id: "doc_abcd1234_1700000000000_000000".to_string(),
            title: "test".to_string(),
            fingerprint: "ff".repeat(32),
            ingested_at: chrono::Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            token_hint: 12,
            subject_top: Vec::new(),
            genre_top: Vec::new(),
        }
    }

    fn sentence(id: &str, ordinal: usize) -> SentenceRecord {
        SentenceRecord {
            id: id.to_string(),
            ordinal,
            concept_weights: ConceptWeights::uniform(),
            embedding: None,
        }
    }

    fn segment(id: &str, ordinal: usize, sentence_ids: &[&str]) -> SegmentRecord {
        SegmentRecord {
            id: id.to_string(),
            ordinal,
            key_terms: Vec::new(),
            sentence_ids: sentence_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn entity(id: &str, label: &str) -> Entity {
        Entity {
            id: id.to_string(),
            label: label.to_string(),
            entity_type: "term".to_string(),
            concept_weights: ConceptWeights::uniform(),
            embedding: None,
        }
    }

    fn mention(sentence_id: &str, entity_id: &str) -> Mention {
        Mention {
            sentence_id: sentence_id.to_string(),
            entity_id: entity_id.to_string(),
            surface: "猫".to_string(),
            dominant_concept: "object".to_string(),
            weight: 1.0,
        }
    }

    #[test]
    fn test_nodes_precede_relationships_and_ids_create_once() {
        let (_, script) = build(
            meta(),
            vec![segment("seg-1", 0, &["sen-1", "sen-2"])],
            vec![sentence("sen-1", 0), sentence("sen-2", 1)],
            vec![entity("ent-1", "猫")],
            vec![mention("sen-1", "ent-1"), mention("sen-2", "ent-1")],
        )
        .unwrap();

        let mut created: HashSet<String> = HashSet::new();
        let mut seen_relationship = false;

        for statement in &script.statements {
            if statement.text.starts_with("CREATE (") {
                assert!(
                    !seen_relationship,
                    "node creation after a relationship statement"
                );
                let id = statement.params["id"].as_str().unwrap().to_string();
                assert!(created.insert(id), "id created twice");
            } else {
                seen_relationship = true;
                for key in ["from", "to"] {
                    let target = statement.params[key].as_str().unwrap();
                    assert!(
                        created.contains(target),
                        "relationship references uncreated node {}",
                        target
                    );
                }
            }
        }

        assert!(seen_relationship);
        // 1 document + 1 segment + 2 sentences + 1 entity node statements
        assert_eq!(created.len(), 5);
    }

    #[test]
    fn test_identical_input_emits_identical_script() {
        let build_once = || {
            build(
                meta(),
                vec![segment("seg-1", 0, &["sen-1"])],
                vec![sentence("sen-1", 0)],
                vec![entity("ent-1", "猫")],
                vec![mention("sen-1", "ent-1")],
            )
            .unwrap()
            .1
        };

        let a = serde_json::to_string(&build_once()).unwrap();
        let b = serde_json::to_string(&build_once()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_orphan_sentence_rejected() {
        let err = build(
            meta(),
            vec![segment("seg-1", 0, &["sen-1"])],
            vec![sentence("sen-1", 0), sentence("sen-2", 1)],
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            IntegrityError::SentenceSegmentMembership { count: 0, .. }
        ));
    }

    #[test]
    fn test_doubly_assigned_sentence_rejected() {
        let err = build(
            meta(),
            vec![
                segment("seg-1", 0, &["sen-1"]),
                segment("seg-2", 1, &["sen-1"]),
            ],
            vec![sentence("sen-1", 0)],
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            IntegrityError::SentenceSegmentMembership { count: 2, .. }
        ));
    }

    #[test]
    fn test_dangling_mention_rejected() {
        let err = build(
            meta(),
            vec![segment("seg-1", 0, &["sen-1"])],
            vec![sentence("sen-1", 0)],
            vec![entity("ent-1", "猫")],
            vec![mention("sen-1", "ent-404")],
        )
        .unwrap_err();

        assert!(matches!(err, IntegrityError::UnknownMentionEntity(_)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = build(
            meta(),
            vec![segment("dup", 0, &["sen-1"])],
            vec![sentence("sen-1", 0)],
            vec![entity("dup", "猫")],
            Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, IntegrityError::DuplicateId(_)));
    }

    #[test]
    fn test_embedding_handle_becomes_statement_params() {
        let mut with_embedding = sentence("sen-1", 0);
        with_embedding.embedding = Some(extract::EmbeddingHandle {
            vector_ref: "vec:7".to_string(),
            model: "ruri-large".to_string(),
        });

        let (_, script) = build(
            meta(),
            vec![segment("seg-1", 0, &["sen-1"])],
            vec![with_embedding],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();

        let sentence_statement = script
            .statements
            .iter()
            .find(|s| s.text.contains(":Sentence"))
            .unwrap();
        assert_eq!(
            sentence_statement.params["embedding_model"],
            Value::from("ruri-large")
        );
    }
}
