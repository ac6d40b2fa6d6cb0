// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::fetch::DEFAULT_USER_AGENT;

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub output_path: PathBuf,
    pub cache_path: PathBuf,
    pub templates_path: Option<PathBuf>,
    pub cache_ttl_hours: u64,
    pub fetch_timeout_seconds: u64,
    pub user_agent: String,
    pub port: u16,
    pub log_file: Option<PathBuf>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("generated_applications"),
            cache_path: PathBuf::from("cache/html"),
            templates_path: None,
            cache_ttl_hours: 24,
            fetch_timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            port: 8020,
            log_file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load `config.yaml` from the working directory for the current environment.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = Self::load_from_file(Path::new(CONFIG_FILE), &environment)?;
        config.apply_port_override(std::env::var("ROCKET_PORT").ok())?;
        config.resolve_paths()
    }

    fn get_environment() -> String {
        std::env::var("JOBAPP_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            warn!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn apply_port_override(&mut self, raw: Option<String>) -> Result<()> {
        if let Some(raw) = raw {
            self.port = raw
                .trim()
                .parse()
                .with_context(|| format!("ROCKET_PORT must be a valid port number, got {:?}", raw))?;
        }
        Ok(())
    }

    fn resolve_paths(self) -> Result<Self> {
        Ok(Self {
            output_path: resolve_path(&self.output_path)?,
            cache_path: resolve_path(&self.cache_path)?,
            templates_path: self.templates_path.as_deref().map(resolve_path).transpose()?,
            log_file: self.log_file.as_deref().map(resolve_path).transpose()?,
            ..self
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 3600)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    pub async fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.output_path, &self.cache_path] {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        if let Some(parent) = self.log_file.as_deref().and_then(Path::parent) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        info!("All configured directories ensured to exist");
        Ok(())
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}
