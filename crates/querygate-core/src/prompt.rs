use crate::SchemaDescription;

/// Assemble the generator prompt for one request.
///
/// The instruction block asks for exactly one statement in SQLite syntax,
/// terminated by a semicolon and without prose.
pub fn build_prompt(schema: &SchemaDescription, request: &str) -> String {
    format!(
        "You are an expert SQL assistant.

DATABASE SCHEMA:
{schema}

USER REQUEST:
{request}

INSTRUCTIONS:
- Generate ONE valid SQL statement.
- If the user wants a new table or to add data, output a proper CREATE TABLE or INSERT statement.
- For queries, generate a SELECT.
- Use only valid SQLite syntax.
- Do not add explanations.
- End with a semicolon.
",
        schema = schema.render(),
        request = request.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NO_TABLES, TableColumns};

    #[test]
    fn embeds_schema_and_request() {
        let schema = SchemaDescription::new(vec![TableColumns::new(
            "patients",
            vec!["id".to_string(), "disease".to_string()],
        )]);
        let prompt = build_prompt(&schema, "  how many patients have flu?\n");

        assert!(prompt.contains("DATABASE SCHEMA:\npatients(id, disease)\n"));
        assert!(prompt.contains("USER REQUEST:\nhow many patients have flu?\n"));
        assert!(prompt.contains("- End with a semicolon."));
    }

    #[test]
    fn empty_schema_still_has_a_section() {
        let prompt = build_prompt(&SchemaDescription::default(), "make a table");
        assert!(prompt.contains(&format!("DATABASE SCHEMA:\n{NO_TABLES}\n")));
    }
}
