//! The "add a new acronym" flow.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::SessionError;
use crate::model::{normalize_key, AcronymStore, TermMap};
use crate::store::StoreBackend;

/// What happened when the user tried to add an acronym.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The acronym was added with this many terms and saved.
    Added { name: String, terms: usize },
    /// An acronym with this name already exists; nothing changed.
    Duplicate { name: String },
    /// The user entered an empty name; nothing changed.
    EmptyName,
}

/// Interactively add one acronym and persist the store.
///
/// The store is only mutated if the new acronym is saved successfully. A
/// failed save removes it again before the error is returned.
pub fn add_acronym<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut AcronymStore,
    backend: &dyn StoreBackend,
) -> Result<AddOutcome, SessionError> {
    let name = normalize_key(&console.ask("Enter the acronym you want to add: ")?);
    if name.is_empty() {
        console.say("Acronym name cannot be empty.")?;
        return Ok(AddOutcome::EmptyName);
    }
    if store.contains(&name) {
        console.say(format!("{name} already exists."))?;
        return Ok(AddOutcome::Duplicate { name });
    }

    console.say(format!("Adding {name}."))?;
    let terms = read_terms(console)?;
    let count = terms.len();

    store.add(&name, terms);
    if let Err(e) = backend.save(store) {
        tracing::warn!("rolling back {name}: save to {} failed", backend.location());
        store.discard(&name);
        return Err(e.into());
    }

    console.say(format!("{name} has been added."))?;
    Ok(AddOutcome::Added { name, terms: count })
}

fn read_terms<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<TermMap, SessionError> {
    let mut terms = TermMap::new();
    loop {
        let label = loop {
            let label = normalize_key(
                &console.ask("Enter the acronym letter or term (e.g., T1 for TTTTTH): ")?,
            );
            if !label.is_empty() {
                break label;
            }
            console.say("Term cannot be empty.")?;
        };
        let meaning = console.ask(&format!("What does {label} stand for? "))?;
        terms.insert(label, meaning);

        if !console.confirm("Do you want to add another term? (yes/no): ")? {
            return Ok(terms);
        }
    }
}
