use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::adapter::ProviderRequest;
use super::providers::ProviderKind;
use crate::errors::AssistError;

/// Sends a shaped provider request and hands back the decoded JSON body.
///
/// Calls are one-shot: no retry, no backoff, no cancellation once sent.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    async fn send(&self, request: &ProviderRequest) -> Result<Value, AssistError>;
}

pub struct AiOrchestrator {
    client: Client,
}

impl AiOrchestrator {
    pub fn new() -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(45))
            .user_agent(concat!("chemassist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| {
                AssistError::InvalidSettings(format!("failed to construct HTTP client: {err}"))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ProviderTransport for AiOrchestrator {
    async fn send(&self, request: &ProviderRequest) -> Result<Value, AssistError> {
        let provider = request.provider;
        let mut builder = self.client.post(request.endpoint.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .json(&request.body)
            .send()
            .await
            .map_err(|source| network_error(provider, source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Transport {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| network_error(provider, source))
    }
}

// Request URLs may carry the Google API key and never leave this module.
fn network_error(provider: ProviderKind, source: reqwest::Error) -> AssistError {
    AssistError::Network {
        provider,
        source: source.without_url(),
    }
}
