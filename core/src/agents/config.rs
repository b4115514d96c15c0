use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::providers::{ProviderKind, DEFAULT_MODEL_ID};
use crate::errors::AssistError;

pub const CONFIG_PATH_ENV: &str = "CHEMASSIST_CONFIG";
pub const DEFAULT_MODEL_ENV: &str = "CHEMASSIST_DEFAULT_MODEL";
pub const USE_MOCK_ENV: &str = "CHEMASSIST_USE_MOCK";
pub const MOCK_DELAY_ENV: &str = "CHEMASSIST_MOCK_DELAY_MS";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 800;

/// Snapshot of everything the assistant reads from the outside world.
#[derive(Debug, Clone, Serialize)]
pub struct AiSettings {
    pub default_model: String,
    pub use_mock: bool,
    pub mock_delay_ms: u64,
    #[serde(skip_serializing)]
    pub credentials: HashMap<ProviderKind, String>,
    pub base_urls: HashMap<ProviderKind, String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL_ID.to_string(),
            use_mock: false,
            mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
            credentials: HashMap::new(),
            base_urls: HashMap::new(),
        }
    }
}

impl AiSettings {
    /// Settings for the canned-response path with no artificial delay.
    pub fn mock() -> Self {
        Self {
            use_mock: true,
            mock_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_credential(mut self, provider: ProviderKind, key: impl Into<String>) -> Self {
        self.credentials.insert(provider, key.into());
        self
    }

    pub fn with_base_url(mut self, provider: ProviderKind, url: impl Into<String>) -> Self {
        self.base_urls.insert(provider, url.into());
        self
    }

    /// Credential for `provider`, ignoring blank values.
    pub fn credential(&self, provider: ProviderKind) -> Option<&str> {
        self.credentials
            .get(&provider)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn base_url(&self, provider: ProviderKind) -> Option<&str> {
        self.base_urls
            .get(&provider)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn has_credentials(&self, provider: ProviderKind) -> bool {
        self.credential(provider).is_some()
    }
}

/// Where settings come from. Consulted on every call, never cached.
pub trait SettingsSource: Send + Sync {
    fn load(&self) -> Result<AiSettings, AssistError>;
}

impl SettingsSource for AiSettings {
    fn load(&self) -> Result<AiSettings, AssistError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProviderTable {
    openai: Option<String>,
    anthropic: Option<String>,
    google: Option<String>,
}

impl ProviderTable {
    fn entries(self) -> impl Iterator<Item = (ProviderKind, String)> {
        [
            (ProviderKind::OpenAi, self.openai),
            (ProviderKind::Anthropic, self.anthropic),
            (ProviderKind::Google, self.google),
        ]
        .into_iter()
        .filter_map(|(provider, value)| value.map(|v| (provider, v)))
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    default_model: Option<String>,
    use_mock: Option<bool>,
    mock_delay_ms: Option<u64>,
    #[serde(default)]
    credentials: ProviderTable,
    #[serde(default)]
    base_urls: ProviderTable,
}

/// Layered settings: defaults, then the optional TOML file, then the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    config_path: Option<PathBuf>,
}

impl EnvSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the TOML file instead of resolving it from the environment.
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }
        if let Some(path) = non_blank(env::var(CONFIG_PATH_ENV).ok()) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("org", "chemassist", "chemassist")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

impl SettingsSource for EnvSettings {
    fn load(&self) -> Result<AiSettings, AssistError> {
        let mut settings = AiSettings::default();
        if let Some(path) = self.config_path() {
            if path.exists() {
                let raw = fs::read_to_string(&path).map_err(|err| {
                    AssistError::InvalidSettings(format!(
                        "failed to read config file '{}': {err}",
                        path.display()
                    ))
                })?;
                apply_file(&mut settings, &raw).map_err(|err| {
                    AssistError::InvalidSettings(format!(
                        "failed to parse config file '{}': {err}",
                        path.display()
                    ))
                })?;
            }
        }
        apply_env(&mut settings, |key| env::var(key).ok())?;
        Ok(settings)
    }
}

fn apply_file(settings: &mut AiSettings, raw: &str) -> Result<(), toml::de::Error> {
    let file: SettingsFile = toml::from_str(raw)?;
    if let Some(model) = non_blank(file.default_model) {
        settings.default_model = model;
    }
    if let Some(flag) = file.use_mock {
        settings.use_mock = flag;
    }
    if let Some(delay) = file.mock_delay_ms {
        settings.mock_delay_ms = delay;
    }
    for (provider, key) in file.credentials.entries() {
        settings.credentials.insert(provider, key);
    }
    for (provider, url) in file.base_urls.entries() {
        settings.base_urls.insert(provider, url);
    }
    Ok(())
}

fn apply_env<F>(settings: &mut AiSettings, lookup: F) -> Result<(), AssistError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(model) = non_blank(lookup(DEFAULT_MODEL_ENV)) {
        settings.default_model = model;
    }
    if let Some(flag) = non_blank(lookup(USE_MOCK_ENV)) {
        settings.use_mock = matches!(flag.to_ascii_lowercase().as_str(), "true" | "1" | "yes");
    }
    if let Some(delay) = non_blank(lookup(MOCK_DELAY_ENV)) {
        settings.mock_delay_ms = delay.parse().map_err(|_| {
            AssistError::InvalidSettings(format!("{MOCK_DELAY_ENV} must be an integer, got '{delay}'"))
        })?;
    }
    for provider in ProviderKind::ALL {
        if let Some(key) = non_blank(lookup(provider.api_key_env())) {
            settings.credentials.insert(provider, key);
        }
        if let Some(url) = non_blank(lookup(provider.base_url_env())) {
            settings.base_urls.insert(provider, url);
        }
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
