//! acrodrill-core: acronym store, editor, and quiz session.
//!
//! This crate holds everything the `acrodrill` binary does: the ordered
//! acronym data model, JSON persistence, console-driven add and quiz flows,
//! the menu loop that ties them together, store validation, and
//! configuration loading.

pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod model;
pub mod quiz;
pub mod session;
pub mod store;
pub mod validate;

pub use config::{load_config_from, AcrodrillConfig};
pub use console::Console;
pub use error::{SessionError, StoreError};
pub use model::{normalize_key, AcronymStore, OrderedMap, TermMap};
pub use session::{Session, SessionEnd, SessionSummary};
pub use store::{JsonFileStore, MemoryStore, StoreBackend, DEFAULT_STORE_PATH};
pub use validate::{validate_store, ValidationWarning};
