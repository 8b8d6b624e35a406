use ident::IdMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sentences per segment window.
    pub segment_window: usize,
    /// Salient terms extracted per sentence.
    pub max_terms_per_sentence: usize,
    pub ids: IdConfig,
    pub batch: BatchConfig,
}

/// Whether re-ingesting byte-identical content reproduces the same
/// identifier set. An explicit choice, not a hidden default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum IdConfig {
    /// Fresh identifiers every run.
    WallClock,
    /// Same input + same seed reproduce the same identifiers.
    Deterministic { seed: u64 },
}

impl IdConfig {
    pub fn to_mode(self) -> IdMode {
        match self {
            IdConfig::WallClock => IdMode::WallClock,
            IdConfig::Deterministic { seed } => IdMode::Deterministic { seed },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub max_concurrent_documents: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segment_window: 5,
            max_terms_per_sentence: 5,
            ids: IdConfig::WallClock,
            batch: BatchConfig {
                max_concurrent_documents: 4,
            },
        }
    }
}

impl PipelineConfig {
    /// Reproducible artifacts for byte-identical inputs.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            ids: IdConfig::Deterministic { seed },
            ..Self::default()
        }
    }
}
