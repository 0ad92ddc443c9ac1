//! Settings and configuration utilities.
//!
//! This module reads settings from $HOME/.pr-describe/settings.json and uses
//! them as a fallback for environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ai::openai::DEFAULT_BASE_URL;
use crate::ai::DEFAULT_MODEL;

/// Environment variable holding the completion API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable selecting the model.
pub const MODEL_VAR: &str = "OPENAI_MODEL";

/// Environment variable overriding the API root.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Settings loaded from $HOME/.pr-describe/settings.json.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".pr-describe").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.env.get(key).cloned())
    }
}

/// Completion backend configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    /// API key; empty when none is configured.
    pub api_key: String,
    /// Target model identifier.
    pub model: String,
    /// API root URL.
    pub base_url: String,
}

impl CompletionSettings {
    /// Resolves the configuration from the environment and `settings`.
    ///
    /// A missing API key is left empty so the description service can
    /// report it before any request is made.
    pub fn resolve(settings: &Settings, model_override: Option<String>) -> Self {
        let api_key = settings.get_env_var(API_KEY_VAR).unwrap_or_default();
        let model = model_override
            .or_else(|| settings.get_env_var(MODEL_VAR))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = settings
            .get_env_var(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            api_key,
            model,
            base_url,
        }
    }
}
