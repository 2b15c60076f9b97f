//! The `acrodrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use acrodrill_core::{validate_store, JsonFileStore, StoreBackend};

pub fn execute(store_path: PathBuf) -> Result<()> {
    let store = JsonFileStore::new(&store_path).load()?;
    println!(
        "Store: {} ({} acronyms, {} terms)",
        store_path.display(),
        store.len(),
        store.term_count()
    );

    let warnings = validate_store(&store);
    for w in &warnings {
        let prefix = match &w.term {
            Some(term) => format!("  [{}/{term}]", w.acronym),
            None => format!("  [{}]", w.acronym),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Store valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
