//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "FORM_BUILDER_DATA_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding forms and responses
    pub data_dir: Option<String>,
    /// Ask before deleting a form (default: true)
    pub confirm_deletes: Option<bool>,
    /// Prefill the preview with the last submitted response (default: true)
    pub prefill_last_response: Option<bool>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "formbuilder", "form-builder-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Resolve the data directory: env var, then config, then platform default
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.resolve_data_dir_with(std::env::var(DATA_DIR_ENV).ok())
    }

    fn resolve_data_dir_with(&self, env_override: Option<String>) -> Option<PathBuf> {
        env_override
            .filter(|dir| !dir.trim().is_empty())
            .or_else(|| self.data_dir.clone())
            .map(PathBuf::from)
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn confirm_deletes(&self) -> bool {
        self.confirm_deletes.unwrap_or(true)
    }

    pub fn prefill_last_response(&self) -> bool {
        self.prefill_last_response.unwrap_or(true)
    }
}
