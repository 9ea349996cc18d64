use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// A missing credential is fatal and reported before any network call.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("GitHub token not configured (set github.token in the config file or GITHUB_TOKEN)")]
    MissingGitHubToken,
    #[error("Search API key not configured (set search.api_key in the config file or MXBAI_API_KEY)")]
    MissingSearchApiKey,
    #[error("Search store ID not configured (set search.store_id in the config file or MXBAI_STORE_ID)")]
    MissingSearchStoreId,
    #[error("Chat secret not configured (set chat.secret in the config file or CHATBASE_SECRET)")]
    MissingChatSecret,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub search: SearchConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Repository in "owner/repo" form
    pub repo: String,
    pub token: Option<String>,
    /// Dashboard cache TTL in seconds
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub store_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub secret: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repo: "shipai-marketplace-demo/ecommerce".to_owned(),
            token: None,
            cache_ttl_secs: 300,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config: Config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Credentials from the environment take precedence over the file.
    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Ok(key) = std::env::var("MXBAI_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Ok(store) = std::env::var("MXBAI_STORE_ID") {
            self.search.store_id = Some(store);
        }
        if let Ok(secret) = std::env::var("CHATBASE_SECRET") {
            self.chat.secret = Some(secret);
        }
    }

    fn config_path() -> PathBuf {
        xdg::BaseDirectories::with_prefix("vitrine")
            .map(|dirs| dirs.get_config_home())
            .unwrap_or_else(|_| PathBuf::from(".config"))
            .join("config.toml")
    }
}
