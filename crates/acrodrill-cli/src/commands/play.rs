//! The `acrodrill play` command.

use std::path::PathBuf;

use anyhow::Result;

use acrodrill_core::{Console, JsonFileStore, Session};

pub fn execute(store_path: PathBuf) -> Result<()> {
    let backend = JsonFileStore::new(store_path);
    let mut session = Session::open(&backend, Console::stdio())?;

    let end = session.run()?;

    let summary = session.summary();
    tracing::info!(
        ?end,
        added = summary.acronyms_added,
        quizzes = summary.quizzes_taken,
        correct = summary.answers_correct,
        answered = summary.answers_total,
        "session finished"
    );
    Ok(())
}
