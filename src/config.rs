//! Configuration management for Research Chat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChatError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote question-answering service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Local persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote question-answering service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every request is sent to (the `/ask` path is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Local persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database location; the platform data directory is used when unset
    #[serde(default)]
    pub path: Option<String>,

    /// Prefix for the two persisted entries (`<namespace>-chats`,
    /// `<namespace>-active-chat`)
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    "research-agent".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            namespace: default_namespace(),
        }
    }
}

impl StorageConfig {
    /// Resolve the on-disk database path
    ///
    /// Uses the configured path if any, otherwise `chats.db` inside the
    /// application's data directory.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(PathBuf::from(path));
        }

        let proj_dirs = ProjectDirs::from("com", "research-chat", "research-chat")
            .ok_or_else(|| ChatError::Storage("Could not determine data directory".into()))?;

        Ok(proj_dirs.data_dir().join("chats.db"))
    }
}

impl Config {
    /// Load configuration from file, environment and CLI, in that order
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatError::Config(format!("Failed to read {}: {}", path, e)))?;
        let config: Config = serde_yaml::from_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path);
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("RESEARCH_CHAT_API_BASE") {
            self.api.base_url = base_url;
        }

        if let Ok(store) = std::env::var("RESEARCH_CHAT_STORE") {
            self.storage.path = Some(store);
        }

        if let Ok(namespace) = std::env::var("RESEARCH_CHAT_NAMESPACE") {
            self.storage.namespace = namespace;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(store_path) = &cli.store_path {
            self.storage.path = Some(store_path.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Config` if the base URL is not an http(s) URL or
    /// the namespace is empty or contains whitespace.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            ChatError::Config(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ChatError::Config(format!(
                "api.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.storage.namespace.is_empty() {
            return Err(
                ChatError::Config("storage.namespace cannot be empty".to_string()).into(),
            );
        }

        if self.storage.namespace.chars().any(char::is_whitespace) {
            return Err(ChatError::Config(
                "storage.namespace cannot contain whitespace".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
