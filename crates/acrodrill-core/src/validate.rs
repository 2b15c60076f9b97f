//! Sanity checks for hand-edited store files.

use crate::model::{normalize_key, AcronymStore};

/// A warning from store validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Acronym the warning is about.
    pub acronym: String,
    /// Term within the acronym, if the warning is term-specific.
    pub term: Option<String>,
    pub message: String,
}

/// Check a loaded store for entries the add flow would never produce.
pub fn validate_store(store: &AcronymStore) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (name, terms) in store.iter() {
        if normalize_key(name) != name {
            warnings.push(ValidationWarning {
                acronym: name.to_string(),
                term: None,
                message: format!(
                    "acronym name is not normalized (expected '{}')",
                    normalize_key(name)
                ),
            });
        }
        if terms.is_empty() {
            warnings.push(ValidationWarning {
                acronym: name.to_string(),
                term: None,
                message: "acronym has no terms".to_string(),
            });
        }
        for (label, meaning) in terms.iter() {
            if normalize_key(label) != label {
                warnings.push(ValidationWarning {
                    acronym: name.to_string(),
                    term: Some(label.to_string()),
                    message: format!(
                        "term label is not normalized (expected '{}')",
                        normalize_key(label)
                    ),
                });
            }
            if meaning.trim().is_empty() {
                warnings.push(ValidationWarning {
                    acronym: name.to_string(),
                    term: Some(label.to_string()),
                    message: "term has an empty meaning".to_string(),
                });
            }
        }
    }

    warnings
}
