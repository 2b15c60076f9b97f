pub mod init;
pub mod list;
pub mod play;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

/// Pick the store file: `--store` wins, then config file and environment.
pub fn resolve_store_path(store: Option<PathBuf>, config: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = store {
        return Ok(path);
    }
    let config = acrodrill_core::load_config_from(config.as_deref())?;
    Ok(config.store_path)
}
