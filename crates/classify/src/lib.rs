pub mod concept;
pub mod features;
pub mod taxonomy;

pub use concept::{CONCEPT_KEYS, ConceptWeights};
pub use features::{MarkerDensities, marker_densities};
pub use taxonomy::{Category, DISCOURSE_GENRES, SUBJECT_DOMAINS, Taxonomy};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// How many categories each taxonomy reports.
pub const TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

/// The fused classification of one piece of text: top categories from both
/// schemes plus the derived concept-weight distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub subject: Vec<CategoryScore>,
    pub genre: Vec<CategoryScore>,
    pub concept_weights: ConceptWeights,
    /// Which stages fell back to the uniform distribution. A quality
    /// signal for the caller to log or count, not an error.
    pub fallbacks: Vec<String>,
}

/// Scores text against both taxonomies and fuses the result into a
/// concept-weight distribution. Pure CPU, no I/O; the same entry point
/// serves document, sentence and entity granularities.
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str, tokens: &[String]) -> Classification {
        let token_set: HashSet<String> =
            tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut fallbacks = Vec::new();

        let (subject_ranked, subject_fell_back) =
            score_taxonomy(&SUBJECT_DOMAINS, &token_set);
        if subject_fell_back {
            fallbacks.push(SUBJECT_DOMAINS.name.to_string());
        }

        let (genre_ranked, genre_fell_back) =
            score_taxonomy(&DISCOURSE_GENRES, &token_set);
        if genre_fell_back {
            fallbacks.push(DISCOURSE_GENRES.name.to_string());
        }

        // Fuse: each scheme's top category contributes its fixed concept
        // profile scaled by the category's score, then the lexical marker
        // densities are added on top.
        let mut raw = [0.0f64; CONCEPT_KEYS.len()];
        add_profile(&mut raw, &SUBJECT_DOMAINS, &subject_ranked[0]);
        add_profile(&mut raw, &DISCOURSE_GENRES, &genre_ranked[0]);

        let densities = features::marker_densities(text);
        raw[0] += densities.temporal;
        raw[1] += densities.spatial;
        raw[2] += densities.affect;

        let raw_sum: f64 = raw.iter().sum();
        if raw_sum <= 0.0 {
            debug!("concept-weight contributions sum to zero, using uniform");
            fallbacks.push("concept".to_string());
        }
        let concept_weights = ConceptWeights::from_raw(&raw);

        Classification {
            subject: subject_ranked.into_iter().take(TOP_K).collect(),
            genre: genre_ranked.into_iter().take(TOP_K).collect(),
            concept_weights,
            fallbacks,
        }
    }

    /// Concept weights only, for sentence- and entity-granularity callers.
    pub fn concept_weights(&self, text: &str, tokens: &[String]) -> ConceptWeights {
        self.classify(text, tokens).concept_weights
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Score one taxonomy over the token set. Returns every category ranked by
/// score (stable sort, so equal scores keep declaration order) and whether
/// the uniform fallback fired.
fn score_taxonomy(
    taxonomy: &Taxonomy,
    token_set: &HashSet<String>,
) -> (Vec<CategoryScore>, bool) {
    let counts: Vec<usize> = taxonomy
        .categories
        .iter()
        .map(|category| {
            category
                .keywords
                .iter()
                .filter(|kw| keyword_present(kw, token_set))
                .count()
        })
        .collect();

    let total: usize = counts.iter().sum();

    if total == 0 {
        debug!(
            taxonomy = taxonomy.name,
            "no keyword signal, falling back to uniform category scores"
        );
        let share = 1.0 / taxonomy.categories.len() as f64;
        let ranked = taxonomy
            .categories
            .iter()
            .map(|category| CategoryScore {
                category: category.name.to_string(),
                score: share,
            })
            .collect();
        return (ranked, true);
    }

    let mut ranked: Vec<CategoryScore> = taxonomy
        .categories
        .iter()
        .zip(counts.iter())
        .map(|(category, &count)| CategoryScore {
            category: category.name.to_string(),
            score: count as f64 / total as f64,
        })
        .collect();

    // Stable sort over the declaration-ordered list: ties keep taxonomy
    // declaration order, never count-map insertion order.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

    (ranked, false)
}

/// A keyword counts as present on an exact token match; keywords written
/// in CJK scripts also count when contained in a longer token, since the
/// tokenizer emits whole script runs.
fn keyword_present(keyword: &str, token_set: &HashSet<String>) -> bool {
    if token_set.contains(keyword) {
        return true;
    }
    !keyword.is_ascii() && token_set.iter().any(|t| t.contains(keyword))
}

fn add_profile(raw: &mut [f64; CONCEPT_KEYS.len()], taxonomy: &Taxonomy, top: &CategoryScore) {
    if let Some(category) = taxonomy.category(&top.category) {
        for (slot, weight) in raw.iter_mut().zip(category.concept_profile.iter()) {
            *slot += weight * top.score;
        }
    }
}
