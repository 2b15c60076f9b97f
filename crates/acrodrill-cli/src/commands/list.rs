//! The `acrodrill list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use acrodrill_core::{JsonFileStore, StoreBackend};

pub fn execute(store_path: PathBuf) -> Result<()> {
    let store = JsonFileStore::new(store_path).load()?;

    if store.is_empty() {
        println!("No acronyms yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Acronym", "Term", "Meaning"]);
    for (name, terms) in store.iter() {
        if terms.is_empty() {
            table.add_row(vec![Cell::new(name), Cell::new("-"), Cell::new("-")]);
        }
        for (label, meaning) in terms.iter() {
            table.add_row(vec![Cell::new(name), Cell::new(label), Cell::new(meaning)]);
        }
    }

    println!("{table}");
    println!("{} acronyms, {} terms", store.len(), store.term_count());
    Ok(())
}
