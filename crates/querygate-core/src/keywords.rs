use std::sync::LazyLock;

use regex::Regex;

/// Verbs the sanitizer accepts as the start of a statement.
pub(crate) const STATEMENT_KEYWORDS: &[&str] = &[
    "select", "create", "insert", "update", "delete", "drop", "alter",
];

/// Words that may not appear anywhere inside a gated read statement.
pub(crate) const FORBIDDEN_IN_SELECT: &[&str] = &[
    "insert", "update", "delete", "drop", "alter", "create", "truncate", "exec",
];

static STATEMENT_KEYWORD: LazyLock<Regex> = LazyLock::new(|| whole_word_any(STATEMENT_KEYWORDS));
static FORBIDDEN_KEYWORD: LazyLock<Regex> = LazyLock::new(|| whole_word_any(FORBIDDEN_IN_SELECT));

fn whole_word_any(words: &[&str]) -> Regex {
    let pattern = format!(r"(?i)\b(?:{})\b", words.join("|"));
    Regex::new(&pattern).expect("keyword alternation is a valid pattern")
}

/// Byte offset of the first whole-word statement keyword, case-insensitive.
pub(crate) fn find_statement_keyword(text: &str) -> Option<usize> {
    STATEMENT_KEYWORD.find(text).map(|found| found.start())
}

/// First whole-word forbidden keyword, lowercased.
pub(crate) fn find_forbidden(text: &str) -> Option<String> {
    FORBIDDEN_KEYWORD
        .find(text)
        .map(|found| found.as_str().to_ascii_lowercase())
}

pub(crate) fn is_statement_keyword(word: &str) -> bool {
    STATEMENT_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(word))
}

/// Leading run of identifier characters.
pub(crate) fn first_word(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    &text[..end]
}
