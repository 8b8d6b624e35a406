use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

pub struct FileReader;

impl FileReader {
    pub async fn read_file(path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension {
            "txt" | "md" => {
                let content = fs::read_to_string(path)
                    .await
                    .context(format!("Failed to read file: {:?}", path))?;
                Ok(content)
            }
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Collect every .txt/.md file under `dir` recursively. Paths are
    /// sorted so batch order is stable across runs.
    pub async fn read_directory(dir: &Path) -> Result<Vec<(String, String)>> {
        let mut paths: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(dir) {
            let entry = entry.context("Failed to walk directory")?;
            if entry.file_type().is_file() {
                if let Some(ext) = entry.path().extension() {
                    if ext == "txt" || ext == "md" {
                        paths.push(entry.into_path());
                    }
                }
            }
        }

        paths.sort();

        let mut files = Vec::new();
        for path in paths {
            let content = Self::read_file(&path).await?;
            files.push((path.to_string_lossy().to_string(), content));
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        tokio::fs::write(&path, b"raw").await.unwrap();

        assert!(FileReader::read_file(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_directory_reading_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir(dir.path().join("sub")).await.unwrap();
        tokio::fs::write(dir.path().join("b.txt"), "second")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("a.md"), "first")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("sub/c.txt"), "third")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("skip.bin"), "binary")
            .await
            .unwrap();

        let files = FileReader::read_directory(dir.path()).await.unwrap();
        let contents: Vec<&str> = files.iter().map(|(_, c)| c.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }
}
