use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_discovery_config::{PathManager, Settings};
use serde_json::json;

fn mask(value: &Option<String>, full: bool) -> String {
    match value {
        None => "(not set)".to_string(),
        Some(v) if full => v.clone(),
        Some(v) => {
            if v.len() > 8 {
                format!("{}…", &v[..4])
            } else {
                "****".to_string()
            }
        }
    }
}

pub fn run_show(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let settings = Settings::load(&paths.settings_file())
        .map_err(|e| eyre!("Failed to load configuration: {}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "config_file": paths.settings_file().display().to_string(),
            "store_url": settings.store_url,
            "store_anon_key": mask(&settings.store_anon_key, full),
            "gemini_api_key": mask(&settings.gemini_api_key, full),
            "model": settings.model,
        }));
        return Ok(());
    }

    output.println(format!("Config file: {}", paths.settings_file().display()));
    output.println(format!(
        "store_url: {}",
        settings.store_url.as_deref().unwrap_or("(not set)")
    ));
    output.println(format!(
        "store_anon_key: {}",
        mask(&settings.store_anon_key, full)
    ));
    output.println(format!(
        "gemini_api_key: {}",
        mask(&settings.gemini_api_key, full)
    ));
    output.println(format!("model: {}", settings.model));
    Ok(())
}

pub fn run_set(
    store_url: Option<String>,
    store_anon_key: Option<String>,
    gemini_api_key: Option<String>,
    model: Option<String>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create application directories: {}", e))?;
    let mut settings = Settings::load(&paths.settings_file())
        .map_err(|e| eyre!("Failed to load configuration: {}", e))?;

    let mut changed = Vec::new();
    if let Some(url) = store_url {
        settings.store_url = Some(url.trim_end_matches('/').to_string());
        changed.push("store_url");
    }
    if let Some(key) = store_anon_key {
        settings.store_anon_key = Some(key);
        changed.push("store_anon_key");
    }
    if let Some(key) = gemini_api_key {
        settings.gemini_api_key = Some(key);
        changed.push("gemini_api_key");
    }
    if let Some(model) = model {
        settings.model = model;
        changed.push("model");
    }

    if changed.is_empty() {
        output.warn("Nothing to set. Use --store-url, --store-anon-key, --gemini-api-key or --model");
        return Ok(());
    }

    settings
        .save(&paths.settings_file())
        .map_err(|e| eyre!("Failed to save configuration: {}", e))?;
    output.success(format!("Updated {}", changed.join(", ")));
    Ok(())
}
