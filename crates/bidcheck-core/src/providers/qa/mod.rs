//! Document-grounded QA providers.

pub mod fake;
pub mod graph_rag;

pub use graph_rag::GraphRagClient;

use async_trait::async_trait;

/// One question-answering call against a project's document set. The response
/// is opaque free-form text; the only structure imposed on it is the
/// `metadata`-block contract in `prompt`/`parse`.
#[async_trait]
pub trait QaClient: Send + Sync {
    async fn query(&self, project_id: &str, prompt: &str) -> anyhow::Result<String>;

    fn provider_name(&self) -> &'static str;
}
