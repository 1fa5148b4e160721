use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keywords;

/// Category of a sanitized statement, taken from its leading verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementCategory {
    Select,
    Create,
    Insert,
    Update,
    Delete,
    /// Anything else, including empty input. Never executed.
    Unknown,
}

impl StatementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Create => "CREATE",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Categories executed directly, without the read gate.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::Create | Self::Insert | Self::Update | Self::Delete
        )
    }
}

impl fmt::Display for StatementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to label a statement.
///
/// Implementations must be total: every input maps to a category and
/// unrecognised input maps to [`StatementCategory::Unknown`].
pub trait Classifier: Send + Sync {
    fn classify(&self, statement: &str) -> StatementCategory;
}

/// Classifier that looks only at the leading keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, statement: &str) -> StatementCategory {
        classify(statement)
    }
}

/// Label `statement` by its first word, ignoring leading non-alphabetic noise.
pub fn classify(statement: &str) -> StatementCategory {
    let text = statement.trim_start_matches(|c: char| !c.is_ascii_alphabetic());
    let verb = keywords::first_word(text).to_ascii_lowercase();

    match verb.as_str() {
        "select" => StatementCategory::Select,
        "create" => StatementCategory::Create,
        "insert" => StatementCategory::Insert,
        "update" => StatementCategory::Update,
        "delete" => StatementCategory::Delete,
        _ => StatementCategory::Unknown,
    }
}
