use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Application settings: the three externally supplied secrets plus the
/// generative model id. Loaded from `config.toml`, then overridden by
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Remote data store base URL (also hosts the auth endpoints).
    #[serde(default)]
    pub store_url: Option<String>,
    /// Anonymous access key for the data store / auth service.
    #[serde(default)]
    pub store_anon_key: Option<String>,
    /// Generative content service API key.
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self {
                model: default_model(),
                ..Self::default()
            }
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("REELMOOD_STORE_URL") {
            self.store_url = Some(url);
        }
        if let Ok(key) = std::env::var("REELMOOD_STORE_KEY") {
            self.store_anon_key = Some(key);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Ok(model) = std::env::var("REELMOOD_MODEL") {
            self.model = model;
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Log a warning for each missing store secret. A missing generative
    /// API key is not warned here: the pipeline reports it per call.
    pub fn warn_on_missing(&self) {
        if self.store_url.is_none() {
            warn!("store_url is not configured; watchlist and ratings will not persist");
        }
        if self.store_anon_key.is_none() {
            warn!("store_anon_key is not configured; watchlist and ratings will not persist");
        }
    }

    pub fn has_store(&self) -> bool {
        self.store_url.is_some() && self.store_anon_key.is_some()
    }
}
