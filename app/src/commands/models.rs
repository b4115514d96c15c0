use anyhow::Result;
use chemassist_core::agents::{ModelRegistry, SettingsSource};
use serde::Serialize;

#[derive(Serialize)]
struct ModelRow {
    id: &'static str,
    name: &'static str,
    provider: &'static str,
    description: &'static str,
    default: bool,
    credentials: bool,
}

pub fn run(settings: &dyn SettingsSource, json: bool) -> Result<()> {
    let settings = settings.load()?;
    let registry = ModelRegistry::default();
    let rows: Vec<ModelRow> = registry
        .list()
        .iter()
        .map(|model| ModelRow {
            id: model.id,
            name: model.name,
            provider: model.provider.as_str(),
            description: model.description,
            default: model.id == settings.default_model,
            credentials: settings.has_credentials(model.provider),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in rows {
        let marker = if row.default { '*' } else { ' ' };
        let key = if row.credentials { "" } else { "  (no API key)" };
        println!(
            "{marker} {:<28} {:<10} {}{key}",
            row.id, row.provider, row.name
        );
    }
    Ok(())
}
