use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed concept-key set, in declaration order. Declaration order is
/// the tie-break everywhere a dominant key has to be picked.
pub const CONCEPT_KEYS: [&str; 6] = [
    "temporal", "spatial", "affect", "object", "action", "abstract",
];

/// Normalized mapping from concept keys to non-negative weights summing
/// to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptWeights {
    weights: BTreeMap<String, f64>,
}

impl ConceptWeights {
    /// Equal weight on every concept key. The fallback for zero-signal
    /// inputs: "nothing matched" must never become a zero vector.
    pub fn uniform() -> Self {
        let share = 1.0 / CONCEPT_KEYS.len() as f64;
        Self {
            weights: CONCEPT_KEYS
                .iter()
                .map(|k| (k.to_string(), share))
                .collect(),
        }
    }

    /// Normalize raw per-key contributions. A zero sum falls back to the
    /// uniform distribution.
    pub fn from_raw(raw: &[f64; CONCEPT_KEYS.len()]) -> Self {
        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            return Self::uniform();
        }
        Self {
            weights: CONCEPT_KEYS
                .iter()
                .zip(raw.iter())
                .map(|(k, w)| (k.to_string(), w / sum))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(0.0)
    }

    /// Arg-max over the declaration-ordered key set; ties resolve to the
    /// earlier-declared key.
    pub fn dominant_key(&self) -> &'static str {
        let mut best = CONCEPT_KEYS[0];
        let mut best_weight = self.get(best);
        for &key in &CONCEPT_KEYS[1..] {
            let weight = self.get(key);
            if weight > best_weight {
                best = key;
                best_weight = weight;
            }
        }
        best
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sums_to_one() {
        let weights = ConceptWeights::uniform();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!((weights.get("temporal") - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_raw_normalizes() {
        let weights = ConceptWeights::from_raw(&[2.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!((weights.get("temporal") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_raw_falls_back_to_uniform() {
        let weights = ConceptWeights::from_raw(&[0.0; 6]);
        assert_eq!(weights, ConceptWeights::uniform());
    }

    #[test]
    fn test_dominant_key_tie_breaks_by_declaration_order() {
        let weights = ConceptWeights::from_raw(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(weights.dominant_key(), "temporal");

        let weights = ConceptWeights::from_raw(&[0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(weights.dominant_key(), "spatial");
    }
}
