use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const BASE_URL_ENV: &str = "TICKETS_API_BASE_URL";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub api: Option<ApiConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

impl AppConfig {
    /// The configured backend URL, before defaulting. Precedence: explicit
    /// flag, then environment, then config file. Empty values count as unset.
    pub fn base_url(&self, flag: Option<&str>, env: Option<&str>) -> Option<String> {
        let file = self.api.as_ref().and_then(|a| a.base_url.as_deref());
        [flag, env, file]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .map(String::from)
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tickets")
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
