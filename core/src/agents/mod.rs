pub mod adapter;
pub mod config;
pub mod intent;
pub mod mock;
pub mod orchestrator;
pub mod prompts;
pub mod providers;

pub use adapter::{build_request, normalize_response, ProviderBody, ProviderRequest};
pub use config::{AiSettings, EnvSettings, SettingsSource};
pub use intent::{Intent, IntentKind};
pub use mock::MockProvider;
pub use orchestrator::{AiOrchestrator, ProviderTransport};
pub use providers::{ModelDescriptor, ModelRegistry, ProviderKind};
