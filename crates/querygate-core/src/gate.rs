//! Safety gate for read statements.
//!
//! The gate is a lexical blacklist: it refuses statement stacking, anything
//! not opening with `select`, and any whole-word mutating keyword. It can
//! not see side effects hidden behind store-specific functions.

use serde::Serialize;
use thiserror::Error;

use crate::TERMINATOR;
use crate::keywords;

/// Reason a read statement was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", content = "keyword", rename_all = "snake_case")]
pub enum GateRejection {
    #[error("more than one statement")]
    MultipleStatements,
    #[error("statement does not start with SELECT")]
    NotSelect,
    #[error("forbidden keyword `{0}`")]
    ForbiddenKeyword(String),
}

/// Check that `statement` is a single plain SELECT.
pub fn check_select(statement: &str) -> Result<(), GateRejection> {
    let text = statement.trim();
    let text = text.strip_suffix(TERMINATOR).unwrap_or(text).trim();

    if text.contains(TERMINATOR) {
        return Err(GateRejection::MultipleStatements);
    }
    if !keywords::first_word(text).eq_ignore_ascii_case("select") {
        return Err(GateRejection::NotSelect);
    }
    if let Some(keyword) = keywords::find_forbidden(text) {
        return Err(GateRejection::ForbiddenKeyword(keyword));
    }
    Ok(())
}

pub fn is_safe_select(statement: &str) -> bool {
    check_select(statement).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_select() {
        assert!(is_safe_select("select id, name from customers"));
        assert!(is_safe_select("  SELECT * FROM customers;  "));
        assert!(is_safe_select(
            "select c.name, sum(o.amount) from customers c join orders o on o.customer_id = c.id group by c.name;"
        ));
    }

    #[test]
    fn rejects_stacked_statements() {
        assert_eq!(
            check_select("select * from t; drop table t;"),
            Err(GateRejection::MultipleStatements)
        );
        assert_eq!(
            check_select("DROP TABLE customers; SELECT 1"),
            Err(GateRejection::MultipleStatements)
        );
    }

    #[test]
    fn rejects_embedded_mutation() {
        assert_eq!(
            check_select("select * from t where x in (delete from t)"),
            Err(GateRejection::ForbiddenKeyword("delete".to_string()))
        );
        assert_eq!(
            check_select("SELECT * FROM t WHERE EXEC('x')"),
            Err(GateRejection::ForbiddenKeyword("exec".to_string()))
        );
        assert!(!is_safe_select("select 1 union select 2 from (truncate t)"));
    }

    #[test]
    fn rejects_statements_not_opening_with_select() {
        for statement in [
            "",
            ";",
            "with x as (select 1) select * from x",
            "-- harmless\nselect 1",
            "/* select */ delete from t",
            "selected from t",
            "explain select 1",
        ] {
            assert_eq!(
                check_select(statement),
                Err(GateRejection::NotSelect),
                "statement: {statement:?}"
            );
        }
    }

    #[test]
    fn identifiers_containing_keywords_are_allowed() {
        assert!(is_safe_select("select created_at, last_update from audit"));
        assert!(is_safe_select("select * from deleted_items"));
    }

    #[test]
    fn rejection_serializes_with_kind() {
        let json = serde_json::to_value(GateRejection::ForbiddenKeyword("drop".into()))
            .expect("serialize");
        assert_eq!(json["kind"], "forbidden_keyword");
        assert_eq!(json["keyword"], "drop");
    }
}
