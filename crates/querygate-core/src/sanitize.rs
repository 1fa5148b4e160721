//! Extraction of a single candidate statement from generated text.
//!
//! Generated text arrives wrapped in markdown fences, preceded by chatter
//! and followed by explanations. The sanitizer peels those away; it does not
//! try to defend against a hostile generator, that is the gate's job.

use crate::TERMINATOR;
use crate::keywords;

const FENCE: &str = "```";
const SQL_TAG: &str = "sql";

/// Reduce raw generated text to at most one statement.
///
/// The result starts at the first whole-word statement keyword and ends right
/// after the first terminator that follows it. When no keyword is present the
/// fence-stripped, trimmed text is returned as is; the classifier turns that
/// into [`StatementCategory::Unknown`](crate::StatementCategory::Unknown).
/// An empty result means nothing was produced.
pub fn sanitize(raw: &str) -> String {
    let text = strip_fences(raw.trim());

    let Some(start) = keywords::find_statement_keyword(&text) else {
        return text;
    };

    let statement = &text[start..];
    let statement = match statement.find(TERMINATOR) {
        Some(idx) => &statement[..idx + TERMINATOR.len_utf8()],
        None => statement,
    };

    statement.trim().to_string()
}

fn strip_fences(text: &str) -> String {
    let mut text = text;
    if let Some(rest) = text.strip_prefix(FENCE) {
        text = strip_language_tag(rest);
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.replace(FENCE, "").trim().to_string()
}

/// Drop an info string such as `sql` right after an opening fence.
///
/// A bare statement keyword is kept, so "```select 1```" survives, and a
/// keyword glued to a `sql` tag ("```sqlSELECT 1```") loses only the tag.
fn strip_language_tag(text: &str) -> &str {
    if let Some(rest) = strip_glued_sql_tag(text) {
        return rest;
    }

    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')))
        .unwrap_or(text.len());
    let (tag, rest) = text.split_at(end);

    let delimited = rest.is_empty()
        || rest.starts_with(char::is_whitespace)
        || rest.starts_with(FENCE);
    if tag.is_empty() || !delimited || keywords::is_statement_keyword(tag) {
        return text;
    }
    rest
}

fn strip_glued_sql_tag(text: &str) -> Option<&str> {
    let prefix = text.get(..SQL_TAG.len())?;
    if !prefix.eq_ignore_ascii_case(SQL_TAG) {
        return None;
    }
    let rest = &text[SQL_TAG.len()..];
    keywords::is_statement_keyword(keywords::first_word(rest)).then_some(rest)
}
