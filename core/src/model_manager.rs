//! High level assistant façade that routes each chat operation through the
//! configured provider (or the mock catalogue) and turns the raw model text
//! into a display message, extracted structures and follow-up suggestions.
//!
//! The façade never fails: provider, configuration and mock faults are all
//! folded into an [`AssistResponse`] with `success: false`, keeping the raw
//! error text for diagnostics.

use std::sync::Arc;

use log::Level;
use serde::Serialize;

use crate::agents::{
    build_request, normalize_response, AiOrchestrator, Intent, MockProvider, ModelDescriptor,
    ModelRegistry, ProviderTransport, SettingsSource,
};
use crate::errors::AssistError;
use crate::extraction::{extract_structures, sanitize, ChemicalStructure};
use crate::logging::log_event;
use crate::session::ChatSession;
use crate::suggestions::suggest;

pub const FAILURE_MESSAGE: &str =
    "AI サービスでエラーが発生しました。しばらくしてからもう一度お試しください。";
pub const FAILURE_SUGGESTIONS: [&str; 2] = ["別の質問をする", "サポートに連絡"];

/// Unified answer handed to the UI for every operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistResponse {
    pub message: String,
    pub structures: Vec<ChemicalStructure>,
    pub suggestions: Vec<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssistResponse {
    fn failure(error: &AssistError) -> Self {
        Self {
            message: FAILURE_MESSAGE.to_string(),
            structures: Vec::new(),
            suggestions: FAILURE_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Owns the model catalogue, the settings source and the provider transport.
pub struct ModelManager {
    registry: ModelRegistry,
    settings: Arc<dyn SettingsSource>,
    transport: Arc<dyn ProviderTransport>,
    mock: MockProvider,
}

impl ModelManager {
    /// Construct a new manager backed by the given settings and transport.
    pub fn new(
        settings: Arc<dyn SettingsSource>,
        transport: Arc<dyn ProviderTransport>,
    ) -> Arc<Self> {
        Self::with_mock(settings, transport, MockProvider::default())
    }

    pub fn with_mock(
        settings: Arc<dyn SettingsSource>,
        transport: Arc<dyn ProviderTransport>,
        mock: MockProvider,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry: ModelRegistry::default(),
            settings,
            transport,
            mock,
        })
    }

    /// Manager talking to the real provider endpoints over HTTP.
    pub fn live(settings: Arc<dyn SettingsSource>) -> Result<Arc<Self>, AssistError> {
        let orchestrator = AiOrchestrator::new()?;
        Ok(Self::new(settings, Arc::new(orchestrator)))
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn list_models(&self) -> &'static [ModelDescriptor] {
        self.registry.list()
    }

    /// Fresh session on the configured default model.
    pub fn session(&self) -> ChatSession {
        let preferred = self.settings.load().ok().map(|s| s.default_model);
        ChatSession::new(&self.registry, preferred.as_deref())
    }

    pub async fn generate_structure(&self, session: &ChatSession, prompt: &str) -> AssistResponse {
        self.run(session, Intent::generate(prompt)).await
    }

    pub async fn analyze_structure(
        &self,
        session: &ChatSession,
        structure: &str,
        question: Option<&str>,
    ) -> AssistResponse {
        self.run(session, Intent::analyze(structure, question.map(str::to_string)))
            .await
    }

    pub async fn ask_question(
        &self,
        session: &ChatSession,
        question: &str,
        context: Option<&str>,
    ) -> AssistResponse {
        self.run(session, Intent::ask(question, context.map(str::to_string)))
            .await
    }

    pub async fn predict_reaction(
        &self,
        session: &ChatSession,
        reactants: &[String],
        conditions: Option<&str>,
    ) -> AssistResponse {
        self.run(
            session,
            Intent::predict(reactants.to_vec(), conditions.map(str::to_string)),
        )
        .await
    }

    /// Dispatch one intent and compose the answer. Never returns an error.
    pub async fn run(&self, session: &ChatSession, intent: Intent) -> AssistResponse {
        match self.dispatch(session, &intent).await {
            Ok(text) => compose(&intent, &text),
            Err(err) => {
                let level = if err.is_configuration() {
                    Level::Error
                } else {
                    Level::Warn
                };
                log_event(
                    level,
                    Some("AI-0201"),
                    "ai.runtime",
                    "AI provider invocation failed",
                    Some(err.explain()),
                    Some(serde_json::json!({
                        "model": session.current_model(),
                        "intent": intent.kind().as_str(),
                        "code": err.code(),
                        "error": err.to_string(),
                    })),
                );
                AssistResponse::failure(&err)
            }
        }
    }

    async fn dispatch(&self, session: &ChatSession, intent: &Intent) -> Result<String, AssistError> {
        let settings = self.settings.load()?;

        if settings.use_mock {
            let text = self.mock.respond(intent, settings.mock_delay_ms).await?;
            log_invocation_success("mock", session.current_model(), intent, &text);
            return Ok(text);
        }

        let model = self.registry.get(session.current_model())?;
        let api_key = settings
            .credential(model.provider)
            .ok_or(AssistError::MissingApiKey {
                provider: model.provider,
            })?;
        let request = build_request(model, api_key, intent, settings.base_url(model.provider))?;
        let raw = self.transport.send(&request).await?;
        let text = normalize_response(&raw, model.provider);
        log_invocation_success(model.provider.as_str(), model.id, intent, &text);
        Ok(text)
    }
}

fn compose(intent: &Intent, text: &str) -> AssistResponse {
    let structures = match intent {
        Intent::GenerateStructure { .. } => extract_structures(text),
        _ => Vec::new(),
    };
    let message = sanitize(text);
    let suggestions = suggest(&message, intent, &structures);
    AssistResponse {
        message,
        structures,
        suggestions,
        success: true,
        error: None,
    }
}

fn log_invocation_success(provider: &str, model: &str, intent: &Intent, text: &str) {
    let preview = text.chars().take(200).collect::<String>();
    log_event(
        Level::Info,
        Some("AI-0200"),
        "ai.runtime",
        "AI chat invocation succeeded",
        None,
        Some(serde_json::json!({
            "provider": provider,
            "model": model,
            "intent": intent.kind().as_str(),
            "preview": preview,
        })),
    );
}
