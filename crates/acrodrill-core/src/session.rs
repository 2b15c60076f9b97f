//! The top-level menu loop.
//!
//! A [`Session`] owns the loaded store and drives the menu until the user
//! declines to continue after a quiz or input runs out.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::editor::{add_acronym, AddOutcome};
use crate::error::SessionError;
use crate::model::AcronymStore;
use crate::quiz::run_quiz;
use crate::store::StoreBackend;

/// A single choice made at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddAcronym,
    TakeQuiz,
}

impl MenuChoice {
    /// Parse the raw menu answer. Anything but `1` or `2` is invalid.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddAcronym),
            "2" => Some(MenuChoice::TakeQuiz),
            _ => None,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user declined to continue after a quiz.
    Finished,
    /// Standard input was closed.
    InputClosed,
}

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub acronyms_added: usize,
    pub quizzes_taken: usize,
    pub answers_correct: usize,
    pub answers_total: usize,
}

pub struct Session<'a, R, W> {
    store: AcronymStore,
    backend: &'a dyn StoreBackend,
    console: Console<R, W>,
    summary: SessionSummary,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        store: AcronymStore,
        backend: &'a dyn StoreBackend,
        console: Console<R, W>,
    ) -> Self {
        Self {
            store,
            backend,
            console,
            summary: SessionSummary::default(),
        }
    }

    /// Load the store from `backend` and start a session on it.
    pub fn open(
        backend: &'a dyn StoreBackend,
        console: Console<R, W>,
    ) -> Result<Self, SessionError> {
        let store = backend.load()?;
        Ok(Self::new(store, backend, console))
    }

    /// Run the menu loop to completion.
    ///
    /// End of input at any prompt ends the session normally; every other
    /// error is returned.
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        match self.run_loop() {
            Ok(()) => Ok(SessionEnd::Finished),
            Err(SessionError::InputClosed) => {
                tracing::debug!("input closed, ending session");
                Ok(SessionEnd::InputClosed)
            }
            Err(e) => Err(e),
        }
    }

    fn run_loop(&mut self) -> Result<(), SessionError> {
        loop {
            match self.prompt_menu()? {
                MenuChoice::AddAcronym => {
                    tracing::debug!("menu -> editing");
                    let outcome = add_acronym(&mut self.console, &mut self.store, self.backend)?;
                    if matches!(outcome, AddOutcome::Added { .. }) {
                        self.summary.acronyms_added += 1;
                    }
                }
                MenuChoice::TakeQuiz => {
                    tracing::debug!("menu -> quizzing");
                    let Some(score) = run_quiz(&mut self.console, &self.store)? else {
                        continue;
                    };
                    self.summary.quizzes_taken += 1;
                    self.summary.answers_correct += score.correct;
                    self.summary.answers_total += score.total;

                    if !self
                        .console
                        .confirm("Do you want to continue with another acronym? (yes/no): ")?
                    {
                        self.console.say("Quiz ended. Thanks for playing!")?;
                        return Ok(());
                    }
                }
            }
        }
    }

    fn prompt_menu(&mut self) -> Result<MenuChoice, SessionError> {
        loop {
            self.console.say("Do you want to:")?;
            self.console.say("1. Add a new acronym")?;
            self.console.say("2. Be tested on an acronym")?;
            let answer = self.console.ask("Enter 1 or 2: ")?;
            match MenuChoice::parse(&answer) {
                Some(choice) => return Ok(choice),
                None => self.console.say("Invalid choice. Try again.")?,
            }
        }
    }

    pub fn store(&self) -> &AcronymStore {
        &self.store
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::io::Cursor;

    type TestSession<'a> = Session<'a, Cursor<Vec<u8>>, Vec<u8>>;

    fn session<'a>(backend: &'a MemoryStore, input: &str) -> TestSession<'a> {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Session::open(backend, console).unwrap()
    }

    fn output(session: TestSession<'_>) -> String {
        String::from_utf8(session.into_console().into_output()).unwrap()
    }

    #[test]
    fn menu_choice_parsing() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddAcronym));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::TakeQuiz));
        assert_eq!(MenuChoice::parse("3"), None);
        assert_eq!(MenuChoice::parse("one"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn add_then_quiz_then_quit() {
        let backend = MemoryStore::default();
        let input = "1\nnasa\nn\nNational\nno\n2\nnasa\nnational\nno\n";
        let mut s = session(&backend, input);

        assert_eq!(s.run().unwrap(), SessionEnd::Finished);
        assert_eq!(
            s.summary(),
            SessionSummary {
                acronyms_added: 1,
                quizzes_taken: 1,
                answers_correct: 1,
                answers_total: 1,
            }
        );
        assert_eq!(backend.saved(), *s.store());

        let out = output(s);
        assert!(out.contains("NASA has been added."));
        assert!(out.contains("Correct! N stands for National"));
        assert!(out.ends_with("Quiz ended. Thanks for playing!\n"));
    }

    #[test]
    fn invalid_menu_choice_reprompts() {
        let initial: AcronymStore = serde_json::from_str(r#"{"OK": {"O": "Oh"}}"#).unwrap();
        let backend = MemoryStore::new(initial);
        let mut s = session(&backend, "0\nadd\n2\nok\noh\nno\n");

        assert_eq!(s.run().unwrap(), SessionEnd::Finished);
        let out = output(s);
        assert_eq!(out.matches("Invalid choice. Try again.").count(), 2);
        assert_eq!(out.matches("Enter 1 or 2: ").count(), 3);
    }

    #[test]
    fn continue_yes_returns_to_menu() {
        let initial: AcronymStore =
            serde_json::from_str(r#"{"HTTP": {"H": "Hypertext", "T": "Transfer"}}"#).unwrap();
        let backend = MemoryStore::new(initial);
        let input = "2\nhttp\nhypertext\nwrong\n yes \n2\nhttp\nx\ntransfer\nno\n";
        let mut s = session(&backend, input);

        assert_eq!(s.run().unwrap(), SessionEnd::Finished);
        assert_eq!(
            s.summary(),
            SessionSummary {
                acronyms_added: 0,
                quizzes_taken: 2,
                answers_correct: 2,
                answers_total: 4,
            }
        );
        let out = output(s);
        assert!(out.contains("Oops! T actually stands for Transfer"));
        assert_eq!(out.matches("Do you want to:").count(), 2);
    }

    #[test]
    fn editing_returns_to_menu() {
        let initial: AcronymStore = serde_json::from_str(r#"{"NASA": {}}"#).unwrap();
        let backend = MemoryStore::new(initial.clone());
        let mut s = session(&backend, "1\nNasa\n");

        assert_eq!(s.run().unwrap(), SessionEnd::InputClosed);
        assert_eq!(*s.store(), initial);
        assert_eq!(backend.save_count(), 0);
        let out = output(s);
        assert!(out.contains("NASA already exists."));
        assert_eq!(out.matches("Do you want to:").count(), 2);
    }

    #[test]
    fn quiz_on_empty_store_returns_to_menu() {
        let backend = MemoryStore::default();
        let mut s = session(&backend, "2\n");

        assert_eq!(s.run().unwrap(), SessionEnd::InputClosed);
        assert_eq!(s.summary().quizzes_taken, 0);
        let out = output(s);
        assert!(out.contains("No acronyms available yet."));
    }

    #[test]
    fn eof_at_menu_ends_session() {
        let backend = MemoryStore::default();
        let mut s = session(&backend, "");
        assert_eq!(s.run().unwrap(), SessionEnd::InputClosed);
    }

    #[test]
    fn long_sessions_do_not_grow_the_stack() {
        let backend = MemoryStore::default();
        let input = "9\n".repeat(50_000);
        let mut s = session(&backend, &input);
        assert_eq!(s.run().unwrap(), SessionEnd::InputClosed);
    }

    #[test]
    fn save_failure_is_fatal() {
        let backend = MemoryStore::failing(AcronymStore::new());
        let mut s = session(&backend, "1\nnasa\nn\nNational\nno\n");

        let err = s.run().unwrap_err();
        assert!(matches!(err, SessionError::Store(_)));
        assert!(s.store().is_empty());
    }
}
