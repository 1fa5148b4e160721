use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use querygate_core::{GateRejection, Row, SchemaDescription, StatementCategory};

/// Terminal result of one request. Every variant ends the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The request text was empty; nothing ran.
    NoRequest,
    /// The caller cancelled while waiting on the generator.
    Cancelled,
    /// The generator could not be reached or gave no usable text.
    GenerationFailed { reason: String },
    /// Sanitizing the generated text left nothing to execute.
    EmptyStatement,
    /// The statement's verb is not one we execute; needs manual review.
    NeedsReview { statement: String },
    /// A SELECT failed the safety gate and was not run.
    Blocked {
        statement: String,
        reason: GateRejection,
    },
    /// The store rejected the statement. Schema is not re-read.
    ExecutionFailed {
        statement: String,
        category: StatementCategory,
        error: String,
    },
    /// A gated SELECT ran; `rows` is empty when nothing matched.
    Rows { statement: String, rows: Vec<Row> },
    /// A write ran and was committed.
    Applied {
        statement: String,
        category: StatementCategory,
        rows_affected: u64,
        /// Schema read back after the write; `None` if that read failed.
        schema: Option<SchemaDescription>,
    },
}

impl Outcome {
    pub fn status(&self) -> &'static str {
        match self {
            Self::NoRequest => "no_request",
            Self::Cancelled => "cancelled",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::EmptyStatement => "empty_statement",
            Self::NeedsReview { .. } => "needs_review",
            Self::Blocked { .. } => "blocked",
            Self::ExecutionFailed { .. } => "execution_failed",
            Self::Rows { .. } => "rows",
            Self::Applied { .. } => "applied",
        }
    }

    /// The sanitized statement, once one exists.
    pub fn statement(&self) -> Option<&str> {
        match self {
            Self::NeedsReview { statement }
            | Self::Blocked { statement, .. }
            | Self::ExecutionFailed { statement, .. }
            | Self::Rows { statement, .. }
            | Self::Applied { statement, .. } => Some(statement),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<StatementCategory> {
        match self {
            Self::NeedsReview { .. } => Some(StatementCategory::Unknown),
            Self::Blocked { .. } | Self::Rows { .. } => Some(StatementCategory::Select),
            Self::ExecutionFailed { category, .. } | Self::Applied { category, .. } => {
                Some(*category)
            }
            _ => None,
        }
    }

    /// True when the statement reached the store and succeeded.
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Rows { .. } | Self::Applied { .. })
    }

    /// True for outcomes an operator should treat as a failed request.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::GenerationFailed { .. } | Self::Blocked { .. } | Self::ExecutionFailed { .. }
        )
    }
}

/// Everything shown back to the caller for one request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestReport {
    pub request_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Schema the prompt was built from; `None` when no request ran.
    pub schema: Option<SchemaDescription>,
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_status_tag() {
        let outcome = Outcome::Blocked {
            statement: "select 1; select 2".to_string(),
            reason: GateRejection::MultipleStatements,
        };
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["status"], "blocked");
        assert_eq!(json["reason"]["kind"], "multiple_statements");
        assert_eq!(outcome.status(), "blocked");
    }

    #[test]
    fn accessors_follow_variant() {
        let outcome = Outcome::Applied {
            statement: "insert into t values (1);".to_string(),
            category: StatementCategory::Insert,
            rows_affected: 1,
            schema: None,
        };
        assert_eq!(outcome.statement(), Some("insert into t values (1);"));
        assert_eq!(outcome.category(), Some(StatementCategory::Insert));
        assert!(outcome.is_executed());
        assert!(!outcome.is_failure());

        assert_eq!(Outcome::EmptyStatement.statement(), None);
        assert!(!Outcome::NoRequest.is_failure());
    }
}
