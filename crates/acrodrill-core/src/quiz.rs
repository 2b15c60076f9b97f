//! The quiz flow: pick an acronym, then answer each of its terms.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::SessionError;
use crate::model::{normalize_key, AcronymStore, TermMap};

/// Whether `given` matches `expected`, ignoring case and surrounding
/// whitespace. No partial credit.
pub fn is_correct(expected: &str, given: &str) -> bool {
    expected.trim().to_lowercase() == given.trim().to_lowercase()
}

/// Result of quizzing one acronym.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

/// Ask the user which acronym to be tested on, re-prompting until they name
/// one that exists. Returns `None` if the store has nothing to quiz.
pub fn choose_acronym<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &AcronymStore,
) -> Result<Option<String>, SessionError> {
    if store.is_empty() {
        console.say("No acronyms available yet. Add one first.")?;
        return Ok(None);
    }

    console.say("Great! Which acronym would you like to be tested on?")?;
    console.say(format!(
        "Available acronyms: {}",
        store.names().collect::<Vec<_>>().join(", ")
    ))?;

    loop {
        let choice = normalize_key(&console.ask("Type the acronym you want to be tested on: ")?);
        if store.contains(&choice) {
            return Ok(Some(choice));
        }
        tracing::debug!("unknown acronym choice {choice:?}");
        console.say("Sorry, that acronym isn't available. Try again.")?;
    }
}

/// Prompt for every term of `terms` in order and report each answer.
pub fn quiz_terms<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    name: &str,
    terms: &TermMap,
) -> Result<QuizScore, SessionError> {
    console.say(format!("Great, let's start with {name} ({} terms).", terms.len()))?;

    let mut score = QuizScore {
        correct: 0,
        total: terms.len(),
    };
    for (label, meaning) in terms.iter() {
        let answer = console.ask(&format!("What does '{label}' stand for? "))?;
        if is_correct(meaning, &answer) {
            score.correct += 1;
            console.say(format!("Correct! {label} stands for {meaning}"))?;
        } else {
            console.say(format!("Oops! {label} actually stands for {meaning}"))?;
        }
    }

    console.say(format!("Score: {}/{} correct.", score.correct, score.total))?;
    Ok(score)
}

/// Choose an acronym and quiz it. Returns `None` when there was nothing to
/// quiz.
pub fn run_quiz<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &AcronymStore,
) -> Result<Option<QuizScore>, SessionError> {
    let Some(name) = choose_acronym(console, store)? else {
        return Ok(None);
    };
    let Some(terms) = store.get(&name) else {
        return Ok(None);
    };
    quiz_terms(console, &name, terms).map(Some)
}
