use crate::record::DocumentRecord;
use crate::script::CreationScript;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;

/// Writes both artifacts for one run. Regeneration is whole-file replace:
/// a prior artifact for the same document identifier is overwritten, never
/// merged or patched.
pub struct ArtifactWriter {
    dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub record: PathBuf,
    pub script: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn write(
        &self,
        record: &DocumentRecord,
        script: &CreationScript,
    ) -> Result<ArtifactPaths> {
        fs::create_dir_all(&self.dir)
            .await
            .context("Failed to create artifact directory")?;

        let stem = &record.document.id;
        let record_path = self.dir.join(format!("{stem}.record.json"));
        let script_path = self.dir.join(format!("{stem}.cypher.json"));

        let record_json = serde_json::to_string_pretty(record)
            .context("Failed to serialize document record")?;
        fs::write(&record_path, record_json)
            .await
            .context(format!("Failed to write record: {:?}", record_path))?;

        let script_json = serde_json::to_string_pretty(script)
            .context("Failed to serialize creation script")?;
        fs::write(&script_path, script_json)
            .await
            .context(format!("Failed to write script: {:?}", script_path))?;

        Ok(ArtifactPaths {
            record: record_path,
            script: script_path,
        })
    }
}
