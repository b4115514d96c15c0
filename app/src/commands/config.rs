use anyhow::{bail, Result};
use chemassist_core::agents::{EnvSettings, ModelRegistry, ProviderKind, SettingsSource};
use clap::{Args, Subcommand};

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand, Clone)]
enum ConfigSubcommand {
    /// Load the layered settings and report what was resolved.
    Check,
}

pub fn run(args: ConfigArgs, settings: &EnvSettings) -> Result<()> {
    match args.command {
        ConfigSubcommand::Check => check(settings),
    }
}

fn check(source: &EnvSettings) -> Result<()> {
    let settings = source.load()?;
    let registry = ModelRegistry::default();
    if !registry.contains(&settings.default_model) {
        bail!(
            "default model '{}' is not in the catalogue",
            settings.default_model
        );
    }

    match source.config_path() {
        Some(path) if path.exists() => println!("config file: {}", path.display()),
        Some(path) => println!("config file: {} (not present, using defaults)", path.display()),
        None => println!("config file: none"),
    }
    println!("default model: {}", settings.default_model);
    println!("mock mode: {}", settings.use_mock);
    for provider in ProviderKind::ALL {
        let status = if settings.has_credentials(provider) {
            "set"
        } else {
            "missing"
        };
        match settings.base_url(provider) {
            Some(url) => println!("{provider}: API key {status}, base URL {url}"),
            None => println!("{provider}: API key {status}"),
        }
    }
    println!("config OK");
    Ok(())
}
