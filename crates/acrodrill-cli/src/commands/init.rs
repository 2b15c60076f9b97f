//! The `acrodrill init` command.

use std::path::PathBuf;

use anyhow::Result;

use acrodrill_core::JsonFileStore;

pub fn execute(store_path: PathBuf) -> Result<()> {
    let backend = JsonFileStore::new(store_path);
    if backend.init()? {
        println!("Created {}", backend.path().display());
    } else {
        println!("{} already exists, skipping.", backend.path().display());
    }
    Ok(())
}
