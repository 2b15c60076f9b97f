//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_STORE_PATH;

/// Environment variable that overrides `store_path`.
pub const STORE_ENV_VAR: &str = "ACRODRILL_STORE";

/// Top-level acrodrill configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcrodrillConfig {
    /// Path of the JSON acronym store.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

impl Default for AcrodrillConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `acrodrill.toml` in the current directory
/// 2. `~/.config/acrodrill/config.toml`
///
/// Environment variable override: `ACRODRILL_STORE`.
pub fn load_config_from(path: Option<&Path>) -> Result<AcrodrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("acrodrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => read_config_file(&path)?,
        None => AcrodrillConfig::default(),
    };

    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Read and parse a single config file, without environment overrides.
fn read_config_file(path: &Path) -> Result<AcrodrillConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = toml::from_str::<AcrodrillConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn apply_env_overrides(
    mut config: AcrodrillConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AcrodrillConfig {
    if let Some(store) = lookup(STORE_ENV_VAR).filter(|s| !s.is_empty()) {
        config.store_path = PathBuf::from(store);
    }
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("acrodrill"))
}
