use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

pub struct PipelineMetrics {
    // Counters
    documents_succeeded: AtomicUsize,
    documents_failed: AtomicUsize,
    documents_deduped: AtomicUsize,
    sentences_total: AtomicUsize,
    entities_total: AtomicUsize,
    mentions_total: AtomicUsize,
    /// Uniform-distribution fallbacks, counted as a quality signal.
    classifier_fallbacks: AtomicUsize,

    // Timing (in microseconds)
    total_ingest_time_us: AtomicU64,
}

impl PipelineMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            documents_succeeded: AtomicUsize::new(0),
            documents_failed: AtomicUsize::new(0),
            documents_deduped: AtomicUsize::new(0),
            sentences_total: AtomicUsize::new(0),
            entities_total: AtomicUsize::new(0),
            mentions_total: AtomicUsize::new(0),
            classifier_fallbacks: AtomicUsize::new(0),
            total_ingest_time_us: AtomicU64::new(0),
        })
    }

    pub fn record_success(
        &self,
        duration: std::time::Duration,
        sentences: usize,
        entities: usize,
        mentions: usize,
        fallbacks: usize,
    ) {
        self.documents_succeeded.fetch_add(1, Ordering::Relaxed);
        self.sentences_total.fetch_add(sentences, Ordering::Relaxed);
        self.entities_total.fetch_add(entities, Ordering::Relaxed);
        self.mentions_total.fetch_add(mentions, Ordering::Relaxed);
        self.classifier_fallbacks.fetch_add(fallbacks, Ordering::Relaxed);
        self.total_ingest_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.documents_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dedup(&self) {
        self.documents_deduped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let succeeded = self.documents_succeeded.load(Ordering::Relaxed);
        let total_us = self.total_ingest_time_us.load(Ordering::Relaxed);

        MetricsSnapshot {
            documents_succeeded: succeeded,
            documents_failed: self.documents_failed.load(Ordering::Relaxed),
            documents_deduped: self.documents_deduped.load(Ordering::Relaxed),
            sentences_total: self.sentences_total.load(Ordering::Relaxed),
            entities_total: self.entities_total.load(Ordering::Relaxed),
            mentions_total: self.mentions_total.load(Ordering::Relaxed),
            classifier_fallbacks: self.classifier_fallbacks.load(Ordering::Relaxed),
            avg_ingest_time_ms: if succeeded > 0 {
                total_us as f64 / succeeded as f64 / 1000.0
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub documents_succeeded: usize,
    pub documents_failed: usize,
    pub documents_deduped: usize,
    pub sentences_total: usize,
    pub entities_total: usize,
    pub mentions_total: usize,
    pub classifier_fallbacks: usize,
    pub avg_ingest_time_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_aggregates_counts() {
        let metrics = PipelineMetrics::new();
        metrics.record_success(std::time::Duration::from_millis(10), 3, 2, 4, 1);
        metrics.record_failure();
        metrics.record_dedup();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_succeeded, 1);
        assert_eq!(snapshot.documents_failed, 1);
        assert_eq!(snapshot.documents_deduped, 1);
        assert_eq!(snapshot.sentences_total, 3);
        assert_eq!(snapshot.entities_total, 2);
        assert_eq!(snapshot.mentions_total, 4);
        assert_eq!(snapshot.classifier_fallbacks, 1);
        assert!(snapshot.avg_ingest_time_ms > 0.0);
    }
}
