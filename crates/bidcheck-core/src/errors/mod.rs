//! Run-level error taxonomy.
//!
//! Per-question failures never surface here; the runner folds them into
//! sentinel results. A `RunError` means the run never produced a `TestRun`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunErrorKind {
    ProjectUnresolved,
    EmptyPack,
    ProviderTimeout,
    ProviderServer,
    Network,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub kind: RunErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub provider: Option<String>,
    pub detail: Option<String>,
}

impl RunError {
    pub fn new(kind: RunErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            provider: None,
            detail: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn project_unresolved(project_id: impl Into<String>) -> Self {
        let project_id = project_id.into();
        Self::new(
            RunErrorKind::ProjectUnresolved,
            format!("project not resolvable: '{}'", project_id),
        )
        .with_detail(project_id)
    }

    pub fn empty_pack(pack_id: impl Into<String>) -> Self {
        let pack_id = pack_id.into();
        Self::new(
            RunErrorKind::EmptyPack,
            format!("pack '{}' has no usable identity", pack_id),
        )
        .with_detail(pack_id)
    }

    pub fn provider_timeout(provider: Option<String>, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let mut err = Self::new(RunErrorKind::ProviderTimeout, detail.clone()).with_detail(detail);
        if let Some(provider) = provider {
            err = err.with_provider(provider);
        }
        err
    }

    pub fn provider_server(
        status: Option<u16>,
        provider: Option<String>,
        detail: impl Into<String>,
    ) -> Self {
        let detail = detail.into();
        let mut err = Self::new(RunErrorKind::ProviderServer, detail.clone()).with_detail(detail);
        if let Some(status) = status {
            err = err.with_status(status);
        }
        if let Some(provider) = provider {
            err = err.with_provider(provider);
        }
        err
    }

    pub fn network(provider: Option<String>, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let mut err = Self::new(RunErrorKind::Network, detail.clone()).with_detail(detail);
        if let Some(provider) = provider {
            err = err.with_provider(provider);
        }
        err
    }

    pub fn other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::new(RunErrorKind::Other, detail.clone()).with_detail(detail)
    }

    /// Best-effort classification of a free-form provider message. Used when
    /// an error crosses an `anyhow` boundary and the typed kind is lost.
    pub fn classify_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let msg = message.to_lowercase();

        let kind = if msg.contains("timeout") || msg.contains("timed out") {
            RunErrorKind::ProviderTimeout
        } else if msg.contains("500")
            || msg.contains("502")
            || msg.contains("503")
            || msg.contains("504")
            || msg.contains("qa api error")
        {
            RunErrorKind::ProviderServer
        } else if msg.contains("network") || msg.contains("connection") || msg.contains("dns") {
            RunErrorKind::Network
        } else if msg.contains("project not resolvable") || msg.contains("unknown project") {
            RunErrorKind::ProjectUnresolved
        } else {
            RunErrorKind::Other
        };

        Self::new(kind, message)
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self::classify_message(err.to_string())
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RunError {}

#[cfg(test)]
mod tests {
    use super::{RunError, RunErrorKind};

    #[test]
    fn classify_message_maps_infra_errors() {
        assert_eq!(
            RunError::classify_message("request timed out while calling QA endpoint").kind,
            RunErrorKind::ProviderTimeout
        );
        assert_eq!(
            RunError::classify_message("QA API error: 503 Service Unavailable").kind,
            RunErrorKind::ProviderServer
        );
        assert_eq!(
            RunError::classify_message("network dns resolution failed").kind,
            RunErrorKind::Network
        );
        assert_eq!(
            RunError::classify_message("something else entirely").kind,
            RunErrorKind::Other
        );
    }

    #[test]
    fn typed_constructors_capture_stable_fields() {
        let err = RunError::provider_server(Some(503), Some("graph-rag".to_string()), "upstream down");
        assert_eq!(err.kind, RunErrorKind::ProviderServer);
        assert_eq!(err.status, Some(503));
        assert_eq!(err.provider.as_deref(), Some("graph-rag"));
        assert_eq!(err.detail.as_deref(), Some("upstream down"));

        let err = RunError::project_unresolved("itb-404");
        assert_eq!(err.kind, RunErrorKind::ProjectUnresolved);
        assert!(err.message.contains("itb-404"));
    }
}
