//! Configuration and storage root resolution.
//!
//! The toolsets root resolves once at startup with this precedence:
//! 1. `NUKE_TOOLSETS_ROOT` environment override (verbatim, if non-empty),
//! 2. the `root` key of the config file,
//! 3. `~/.nuke/toolsets_data`.
//! Nothing validates that the resolved path exists; callers handle absence.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the toolsets root.
pub const ENV_TOOLSETS_ROOT: &str = "NUKE_TOOLSETS_ROOT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    /// Toolsets root, below the environment override in precedence
    pub root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            root: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Resolve the toolsets root for this process.
    pub fn resolve_root(&self) -> PathBuf {
        self.resolve_root_from(env::var_os(ENV_TOOLSETS_ROOT))
    }

    fn resolve_root_from(&self, env_override: Option<OsString>) -> PathBuf {
        if let Some(value) = env_override {
            let value = value.to_string_lossy();
            if !value.trim().is_empty() {
                return PathBuf::from(value.into_owned());
            }
        }
        if let Some(root) = &self.root {
            return root.clone();
        }
        default_root()
    }
}

/// Per-user fallback root, kept clear of the host's plugin install paths.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nuke")
        .join("toolsets_data")
}
