//! Scripted QA client for tests.

use super::QaClient;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted reply, consumed in order.
pub enum Scripted {
    Respond(String),
    Error(String),
}

/// Replays a fixed script of responses/errors, one per `query` call. When the
/// script runs out it keeps returning the default response.
pub struct FakeClient {
    script: Mutex<VecDeque<Scripted>>,
    default_response: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_response: "Yes - confirmed in the documents.".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    pub fn respond(self, response: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(response.into()));
        self
    }

    pub fn error(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Error(message.into()));
        self
    }

    /// (project_id, prompt) pairs seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for FakeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QaClient for FakeClient {
    async fn query(&self, project_id: &str, prompt: &str) -> anyhow::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((project_id.to_string(), prompt.to_string()));

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Respond(r)) => Ok(r),
            Some(Scripted::Error(msg)) => Err(anyhow::anyhow!(msg)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
