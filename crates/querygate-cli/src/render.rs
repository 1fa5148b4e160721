use serde_json::Value;

use querygate_core::{Row, SchemaDescription};
use querygate_engine::{Outcome, RequestReport};

/// Human-readable report for one request.
pub fn render_report(report: &RequestReport) -> String {
    let mut out = String::new();
    if let Some(schema) = &report.schema {
        out.push_str(&format!("Schema:    {schema}\n"));
    }
    if let Some(statement) = report.outcome.statement() {
        out.push_str(&format!("Statement: {statement}\n"));
    }
    if let Some(category) = report.outcome.category() {
        out.push_str(&format!("Type:      {category}\n"));
    }
    out.push('\n');
    out.push_str(&render_outcome(&report.outcome));
    out
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::NoRequest => "Nothing to do: empty request.\n".to_string(),
        Outcome::Cancelled => "Cancelled.\n".to_string(),
        Outcome::GenerationFailed { reason } => format!("Generation failed: {reason}\n"),
        Outcome::EmptyStatement => "Nothing to execute: no statement was produced.\n".to_string(),
        Outcome::NeedsReview { .. } => {
            "Unrecognized statement type. Please review manually.\n".to_string()
        }
        Outcome::Blocked { reason, .. } => format!("Unsafe SELECT blocked: {reason}.\n"),
        Outcome::ExecutionFailed { error, .. } => format!("SQL execution error: {error}\n"),
        Outcome::Rows { rows, .. } => {
            let noun = if rows.len() == 1 { "row" } else { "rows" };
            format!("{}({} {noun})\n", render_rows(rows), rows.len())
        }
        Outcome::Applied {
            category,
            rows_affected,
            schema,
            ..
        } => {
            let mut out = format!("{category} executed ({rows_affected} rows affected).\n");
            match schema {
                Some(schema) => out.push_str(&format!("Updated schema: {schema}\n")),
                None => out.push_str("Updated schema unavailable.\n"),
            }
            out
        }
    }
}

pub fn render_schema(schema: &SchemaDescription) -> String {
    format!("{schema}\n")
}

/// Aligned text table; columns come from the first row.
pub fn render_rows(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| row.get(*header).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            cells
                .iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, values: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = values
        .zip(widths)
        .map(|(value, width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querygate_core::{GateRejection, StatementCategory};
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn rows_render_as_aligned_table() {
        let rows = vec![
            row(&[("id", json!(1)), ("name", json!("Rahul")), ("note", Value::Null)]),
            row(&[("id", json!(10)), ("name", json!("Zara")), ("note", json!("vip"))]),
        ];
        assert_eq!(
            render_rows(&rows),
            "id | name  | note\n\
             -- | ----- | ----\n\
             1  | Rahul | NULL\n\
             10 | Zara  | vip\n"
        );
    }

    #[test]
    fn no_rows_render_nothing() {
        assert_eq!(render_rows(&[]), "");
        let text = render_outcome(&Outcome::Rows {
            statement: "select 1 where 0".to_string(),
            rows: Vec::new(),
        });
        assert_eq!(text, "(0 rows)\n");
    }

    #[test]
    fn blocked_outcome_names_the_reason() {
        let text = render_outcome(&Outcome::Blocked {
            statement: "select * from t; drop table t;".to_string(),
            reason: GateRejection::MultipleStatements,
        });
        assert_eq!(text, "Unsafe SELECT blocked: more than one statement.\n");
    }

    #[test]
    fn applied_outcome_shows_schema() {
        let text = render_outcome(&Outcome::Applied {
            statement: "create table t (a int);".to_string(),
            category: StatementCategory::Create,
            rows_affected: 0,
            schema: Some(SchemaDescription::default()),
        });
        assert!(text.starts_with("CREATE executed"));
        assert!(text.contains("Updated schema: No tables found."));
    }
}
