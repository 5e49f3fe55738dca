use super::QaClient;
use async_trait::async_trait;
use serde_json::json;

pub const DEFAULT_ENDPOINT: &str = "https://query-mod-dev.hyperwaterbids.com/query";

/// HTTP client for the GraphRAG query service. One POST per question; the
/// service answers with free-form text in a JSON envelope.
pub struct GraphRagClient {
    pub endpoint: String,
    client: reqwest::Client,
}

impl GraphRagClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint from `BIDCHECK_QA_ENDPOINT`, falling back to the default.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("BIDCHECK_QA_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }
}

#[async_trait]
impl QaClient for GraphRagClient {
    async fn query(&self, project_id: &str, prompt: &str) -> anyhow::Result<String> {
        let body = json!({
            "itb_id": project_id,
            "method": "basic",
            "query": prompt,
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!(
                "QA API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
        }

        let json: serde_json::Value = resp.json().await?;

        // Older deployments answer under "answer" instead of "response".
        let text = json
            .get("response")
            .and_then(|v| v.as_str())
            .or_else(|| json.get("answer").and_then(|v| v.as_str()))
            .unwrap_or("")
            .to_string();

        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "graph-rag"
    }
}
