use thiserror::Error;

use crate::agents::ProviderKind;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("API key not found for {provider}")] MissingApiKey { provider: ProviderKind },
    #[error("Invalid assistant settings: {0}")] InvalidSettings(String),
    #[error("Unknown AI model: {0}")] UnknownModel(String),
    #[error("{provider} API error: {status} - {body}")]
    Transport {
        provider: ProviderKind,
        status: u16,
        body: String,
    },
    #[error("{provider} request failed: {source}")]
    Network {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },
    #[error("Mock response catalogue is malformed: {0}")] MalformedMockData(String),
}

impl AssistError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "CFG-1001",
            Self::InvalidSettings(_) => "CFG-1002",
            Self::UnknownModel(_) => "CFG-1003",
            Self::Transport { .. } => "NET-1001",
            Self::Network { .. } => "NET-1002",
            Self::MalformedMockData(_) => "MCK-1001",
        }
    }
    pub fn explain(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "No credential is configured for the active model's provider.",
            Self::InvalidSettings(_) => "The assistant configuration could not be read or is inconsistent.",
            Self::UnknownModel(_) => "The requested model is not part of the model catalogue.",
            Self::Transport { .. } => "The provider answered with a non-success HTTP status.",
            Self::Network { .. } => "The provider could not be reached or returned an unreadable body.",
            Self::MalformedMockData(_) => "The embedded mock responses failed to parse.",
        }
    }
    /// Configuration errors are surfaced verbatim and never worth retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey { .. } | Self::InvalidSettings(_) | Self::UnknownModel(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Editor command failed: {0}")] Command(String),
}

impl CanvasError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Command(_) => "CNV-1001",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_message_names_the_provider() {
        let err = AssistError::MissingApiKey {
            provider: ProviderKind::OpenAi,
        };
        assert_eq!(err.to_string(), "API key not found for openai");
        assert_eq!(err.code(), "CFG-1001");
        assert!(err.is_configuration());
    }

    #[test]
    fn transport_error_carries_status_and_body() {
        let err = AssistError::Transport {
            provider: ProviderKind::Anthropic,
            status: 529,
            body: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "anthropic API error: 529 - overloaded");
        assert!(!err.is_configuration());
    }
}
