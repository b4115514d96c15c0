//! Static catalogue of the chat models the assistant can talk to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AssistError;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAi, Self::Anthropic, Self::Google];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    /// Environment variable holding the provider credential.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
        }
    }

    pub fn base_url_env(self) -> &'static str {
        match self {
            Self::OpenAi => "CHEMASSIST_OPENAI_BASE_URL",
            Self::Anthropic => "CHEMASSIST_ANTHROPIC_BASE_URL",
            Self::Google => "CHEMASSIST_GOOGLE_BASE_URL",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" | "gemini" => Ok(Self::Google),
            other => Err(format!(
                "Unsupported provider '{other}'. Supported values: openai, anthropic, google."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: ProviderKind,
    pub endpoint: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_MODEL_ID: &str = "gpt-3.5-turbo";

pub const MODEL_CATALOG: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "gpt-4o",
        name: "GPT-4o",
        provider: ProviderKind::OpenAi,
        endpoint: OPENAI_CHAT_URL,
        description: "マルチモーダル対応、画像と化学構造の統合分析に最適",
    },
    ModelDescriptor {
        id: "gpt-4o-mini",
        name: "GPT-4o Mini",
        provider: ProviderKind::OpenAi,
        endpoint: OPENAI_CHAT_URL,
        description: "高速・低コスト、基本的な化学構造生成に最適",
    },
    ModelDescriptor {
        id: "gpt-4-turbo",
        name: "GPT-4 Turbo",
        provider: ProviderKind::OpenAi,
        endpoint: OPENAI_CHAT_URL,
        description: "高性能で高速、複雑な化学分析に最適",
    },
    ModelDescriptor {
        id: "gpt-3.5-turbo",
        name: "GPT-3.5 Turbo",
        provider: ProviderKind::OpenAi,
        endpoint: OPENAI_CHAT_URL,
        description: "コスト効率が良く、日常的な化学構造生成に最適",
    },
    ModelDescriptor {
        id: "o1-preview",
        name: "O1 Preview",
        provider: ProviderKind::OpenAi,
        endpoint: OPENAI_CHAT_URL,
        description: "推論特化モデル、複雑な化学反応メカニズム解析に特化",
    },
    ModelDescriptor {
        id: "o1-mini",
        name: "O1 Mini",
        provider: ProviderKind::OpenAi,
        endpoint: OPENAI_CHAT_URL,
        description: "推論特化型コンパクト版、効率的な反応予測",
    },
    ModelDescriptor {
        id: "claude-3-5-sonnet-20241022",
        name: "Claude 3.5 Sonnet",
        provider: ProviderKind::Anthropic,
        endpoint: ANTHROPIC_MESSAGES_URL,
        description: "Anthropicの最新最高性能モデル、詳細な化学分析に最適",
    },
    ModelDescriptor {
        id: "claude-3-opus-20240229",
        name: "Claude 3 Opus",
        provider: ProviderKind::Anthropic,
        endpoint: ANTHROPIC_MESSAGES_URL,
        description: "高性能モデル、複雑な化学構造解析に最適",
    },
    ModelDescriptor {
        id: "claude-3-haiku-20240307",
        name: "Claude 3 Haiku",
        provider: ProviderKind::Anthropic,
        endpoint: ANTHROPIC_MESSAGES_URL,
        description: "高速で効率的、基本的な化学タスクに最適",
    },
    ModelDescriptor {
        id: "gemini-1.5-pro",
        name: "Gemini 1.5 Pro",
        provider: ProviderKind::Google,
        endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro-latest:generateContent",
        description: "Googleの高性能モデル、複雑な化学分析に最適",
    },
    ModelDescriptor {
        id: "gemini-1.5-flash",
        name: "Gemini 1.5 Flash",
        provider: ProviderKind::Google,
        endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent",
        description: "高速レスポンス、リアルタイム対話に最適",
    },
];

/// Read-only view over the model catalogue.
#[derive(Debug, Clone, Copy)]
pub struct ModelRegistry {
    models: &'static [ModelDescriptor],
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self {
            models: MODEL_CATALOG,
        }
    }
}

impl ModelRegistry {
    pub fn list(&self) -> &'static [ModelDescriptor] {
        self.models
    }

    pub fn get(&self, id: &str) -> Result<&'static ModelDescriptor, AssistError> {
        self.models
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AssistError::UnknownModel(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.iter().any(|m| m.id == id)
    }

    pub fn default_model(&self) -> &'static ModelDescriptor {
        self.get(DEFAULT_MODEL_ID)
            .ok()
            .or_else(|| self.models.first())
            .unwrap_or(&MODEL_CATALOG[3])
    }
}
