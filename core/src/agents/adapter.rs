//! Per-provider request shaping and response normalisation.
//!
//! Each provider speaks its own JSON dialect. Requests are modelled as a
//! closed [`ProviderBody`] union so that adding a provider is a checked
//! variant addition rather than another loosely-typed map.

use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use super::intent::Intent;
use super::prompts::{build_system, build_user};
use super::providers::{ModelDescriptor, ProviderKind};
use crate::errors::AssistError;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 1000;
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnthropicMessagesRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProviderBody {
    OpenAi(OpenAiChatRequest),
    Anthropic(AnthropicMessagesRequest),
    Google(GeminiGenerateRequest),
}

/// A fully-shaped HTTP call, built and consumed within one dispatch.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub provider: ProviderKind,
    pub endpoint: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: ProviderBody,
}

pub fn build_request(
    model: &ModelDescriptor,
    api_key: &str,
    intent: &Intent,
    base_url_override: Option<&str>,
) -> Result<ProviderRequest, AssistError> {
    let system = build_system(intent.kind());
    let user = build_user(intent);
    let mut endpoint = resolve_endpoint(model.endpoint, base_url_override)?;
    let mut headers = vec![("content-type", "application/json".to_string())];

    let body = match model.provider {
        ProviderKind::OpenAi => {
            headers.push(("authorization", format!("Bearer {api_key}")));
            ProviderBody::OpenAi(OpenAiChatRequest {
                model: model.id.to_string(),
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: system,
                    },
                    ChatMessage {
                        role: "user",
                        content: user,
                    },
                ],
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            })
        }
        ProviderKind::Anthropic => {
            headers.push(("x-api-key", api_key.to_string()));
            headers.push(("anthropic-version", ANTHROPIC_VERSION.to_string()));
            ProviderBody::Anthropic(AnthropicMessagesRequest {
                model: model.id.to_string(),
                system,
                messages: vec![ChatMessage {
                    role: "user",
                    content: user,
                }],
                max_tokens: MAX_TOKENS,
            })
        }
        ProviderKind::Google => {
            endpoint.query_pairs_mut().append_pair("key", api_key);
            ProviderBody::Google(GeminiGenerateRequest {
                contents: vec![GeminiContent {
                    parts: vec![GeminiPart {
                        text: format!("{system}\n\n{user}"),
                    }],
                }],
                generation_config: GeminiGenerationConfig {
                    temperature: TEMPERATURE,
                    max_output_tokens: MAX_TOKENS,
                },
            })
        }
    };

    Ok(ProviderRequest {
        provider: model.provider,
        endpoint,
        headers,
        body,
    })
}

/// Re-root the catalogue endpoint's path onto `base_url_override`, if any.
fn resolve_endpoint(endpoint: &str, base_url_override: Option<&str>) -> Result<Url, AssistError> {
    let catalogue = Url::parse(endpoint)
        .map_err(|err| AssistError::InvalidSettings(format!("bad endpoint '{endpoint}': {err}")))?;
    let Some(base) = base_url_override else {
        return Ok(catalogue);
    };
    let base = Url::parse(base.trim())
        .map_err(|err| AssistError::InvalidSettings(format!("bad base URL '{base}': {err}")))?;
    let joined = format!(
        "{}{}",
        base.as_str().trim_end_matches('/'),
        catalogue.path()
    );
    Url::parse(&joined)
        .map_err(|err| AssistError::InvalidSettings(format!("bad base URL '{joined}': {err}")))
}

/// Pull the first completion text out of a provider response. Missing fields
/// degrade to an empty string.
pub fn normalize_response(raw: &Value, provider: ProviderKind) -> String {
    let text = match provider {
        ProviderKind::OpenAi => raw
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(|val| val.as_str()),
        ProviderKind::Anthropic => raw
            .get("content")
            .and_then(|c| c.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str()),
        ProviderKind::Google => raw
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|cand| cand.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str()),
    };
    text.unwrap_or_default().to_string()
}
