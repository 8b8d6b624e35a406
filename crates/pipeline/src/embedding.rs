use async_trait::async_trait;
use extract::EmbeddingHandle;

/// Collaborator seam for embedding generation. An implementation wraps an
/// external encoder service (RURI/Qwen-style), stores the vector wherever
/// it lives, and returns the opaque handle. The pipeline only forwards
/// text and attaches the handle; it never sees vector contents.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> anyhow::Result<EmbeddingHandle>;
}
