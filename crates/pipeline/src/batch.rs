use crate::metrics::PipelineMetrics;
use crate::{DocumentInput, Pipeline, PipelineConfig};
use anyhow::Result;
use artifact::ArtifactWriter;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

/// Drives a batch of documents through the pipeline with bounded
/// parallelism. Failures stay local to one document: a failed document is
/// logged and counted, and the batch continues.
pub struct BatchDriver {
    pipeline: Arc<Pipeline>,
    metrics: Arc<PipelineMetrics>,
    writer: Option<Arc<ArtifactWriter>>,
    /// Content fingerprint -> first source seen with it.
    seen_fingerprints: DashMap<String, String>,
    concurrency: usize,
}

#[derive(Debug)]
pub struct BatchSummary {
    pub run_id: Uuid,
    /// Document identifiers of successful ingestions.
    pub succeeded: Vec<String>,
    /// (source, error) pairs for documents that failed.
    pub failed: Vec<(String, String)>,
    /// Sources skipped because their content fingerprint was already seen.
    pub deduped: Vec<String>,
}

impl BatchDriver {
    pub fn new(config: PipelineConfig) -> Self {
        let concurrency = config.batch.max_concurrent_documents.max(1);
        Self {
            pipeline: Arc::new(Pipeline::new(config)),
            metrics: PipelineMetrics::new(),
            writer: None,
            seen_fingerprints: DashMap::new(),
            concurrency,
        }
    }

    /// Also write both artifacts for every successful document under `dir`.
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.writer = Some(Arc::new(ArtifactWriter::new(dir.into())));
        self
    }

    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        self.metrics.clone()
    }

    /// Read every .txt/.md file under `dir` and ingest the lot.
    pub async fn ingest_directory(&self, dir: &Path) -> Result<BatchSummary> {
        let files = ingest::FileReader::read_directory(dir).await?;
        let inputs = files
            .into_iter()
            .map(|(path, text)| {
                let title = Path::new(&path)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("untitled")
                    .to_string();
                DocumentInput::new(title, path, text)
            })
            .collect();
        Ok(self.ingest_inputs(inputs).await)
    }

    pub async fn ingest_inputs(&self, inputs: Vec<DocumentInput>) -> BatchSummary {
        let run_id = Uuid::new_v4();
        info!(%run_id, documents = inputs.len(), "starting batch ingestion");

        let mut deduped = Vec::new();
        let mut fresh = Vec::new();

        for input in inputs {
            let fingerprint = ingest::fingerprint(input.text.as_bytes());
            match self.seen_fingerprints.entry(fingerprint) {
                Entry::Occupied(existing) => {
                    info!(
                        source = %input.source,
                        duplicate_of = %existing.get(),
                        "skipping document with already-seen content fingerprint"
                    );
                    self.metrics.record_dedup();
                    deduped.push(input.source);
                }
                Entry::Vacant(slot) => {
                    slot.insert(input.source.clone());
                    fresh.push(input);
                }
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<(String, Result<String, String>)> = JoinSet::new();

        for input in fresh {
            let semaphore = semaphore.clone();
            let pipeline = self.pipeline.clone();
            let writer = self.writer.clone();
            let metrics = self.metrics.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (input.source.clone(), Err("semaphore closed".to_string()));
                };

                let started = Instant::now();
                match pipeline.ingest_document(&input).await {
                    Ok(outcome) => {
                        if let Some(writer) = writer {
                            if let Err(e) = writer.write(&outcome.record, &outcome.script).await
                            {
                                metrics.record_failure();
                                return (input.source.clone(), Err(format!("{:#}", e)));
                            }
                        }
                        metrics.record_success(
                            started.elapsed(),
                            outcome.record.sentences.len(),
                            outcome.record.entities.len(),
                            outcome.record.mentions.len(),
                            outcome.fallbacks.len(),
                        );
                        (input.source.clone(), Ok(outcome.record.document.id))
                    }
                    Err(e) => {
                        metrics.record_failure();
                        (input.source.clone(), Err(format!("{:#}", e)))
                    }
                }
            });
        }

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(document_id))) => succeeded.push(document_id),
                Ok((source, Err(error))) => {
                    warn!(source = %source, error = %error, "document ingestion failed");
                    failed.push((source, error));
                }
                Err(e) => {
                    warn!(error = %e, "ingestion task panicked");
                    failed.push(("<unknown>".to_string(), e.to_string()));
                }
            }
        }

        // Completion order is nondeterministic; sort for stable summaries
        succeeded.sort();
        failed.sort();
        deduped.sort();

        info!(
            %run_id,
            succeeded = succeeded.len(),
            failed = failed.len(),
            deduped = deduped.len(),
            "batch ingestion finished"
        );

        BatchSummary {
            run_id,
            succeeded,
            failed,
            deduped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> BatchDriver {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        BatchDriver::new(PipelineConfig::default())
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_document() {
        let inputs = vec![
            DocumentInput::new("good-1", "a.txt", "猫が座った。"),
            DocumentInput::new("bad", "b.txt", "   "),
            DocumentInput::new("good-2", "c.txt", "犬が走った。"),
        ];

        let driver = driver();
        let summary = driver.ingest_inputs(inputs).await;

        assert_eq!(summary.succeeded.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "b.txt");

        let snapshot = driver.metrics().snapshot();
        assert_eq!(snapshot.documents_succeeded, 2);
        assert_eq!(snapshot.documents_failed, 1);
    }

    #[tokio::test]
    async fn test_duplicate_content_is_skipped() {
        let inputs = vec![
            DocumentInput::new("original", "a.txt", "猫が座った。"),
            DocumentInput::new("copy", "b.txt", "猫が座った。"),
        ];

        let summary = driver().ingest_inputs(inputs).await;

        assert_eq!(summary.succeeded.len(), 1);
        assert_eq!(summary.deduped, vec!["b.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_artifacts_written_for_successful_documents() {
        let dir = tempfile::tempdir().unwrap();
        let driver = BatchDriver::new(PipelineConfig::default())
            .with_artifact_dir(dir.path());

        let summary = driver
            .ingest_inputs(vec![DocumentInput::new("cats", "a.txt", "猫が座った。")])
            .await;

        assert_eq!(summary.succeeded.len(), 1);
        let record_path = dir
            .path()
            .join(format!("{}.record.json", summary.succeeded[0]));
        assert!(record_path.exists());
    }

    #[tokio::test]
    async fn test_directory_ingestion_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("one.txt"), "猫が座った。")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("two.md"), "犬が走った。")
            .await
            .unwrap();

        let summary = driver().ingest_directory(dir.path()).await.unwrap();
        assert_eq!(summary.succeeded.len(), 2);
        assert!(summary.failed.is_empty());
    }
}
