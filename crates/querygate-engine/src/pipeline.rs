use std::time::Instant;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use querygate_core::{
    Classifier, Error, KeywordClassifier, Result, SchemaDescription, StatementCategory,
    build_prompt, check_select, sanitize,
};
use querygate_llm::{GenerationError, Generator};
use querygate_store::Store;

use crate::config::PipelineConfig;
use crate::outcome::{Outcome, RequestReport};

/// One generator, one store, and the policy between them.
///
/// Requests run sequentially inside a call; the pipeline adds no locking of
/// its own, so concurrent callers rely on the store's isolation.
pub struct Pipeline<G, S> {
    generator: G,
    store: S,
    classifier: Box<dyn Classifier>,
    config: PipelineConfig,
}

impl<G: Generator, S: Store> Pipeline<G, S> {
    pub fn new(generator: G, store: S, config: PipelineConfig) -> Self {
        Self {
            generator,
            store,
            classifier: Box::new(KeywordClassifier),
            config,
        }
    }

    /// Swap the statement classifier.
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current schema, read fresh from the store.
    pub async fn schema(&self) -> Result<SchemaDescription> {
        self.store.introspect().await
    }

    pub async fn run(&self, request: &str) -> Result<RequestReport> {
        self.run_with_cancel(request, &CancellationToken::new()).await
    }

    /// Run one request end to end.
    ///
    /// `cancel` is honoured while waiting on the generator; once a statement
    /// reaches the store it runs to completion.
    pub async fn run_with_cancel(
        &self,
        request: &str,
        cancel: &CancellationToken,
    ) -> Result<RequestReport> {
        let request_id = Uuid::new_v4();
        let started_at = Utc::now();
        let timer = Instant::now();

        let request = request.trim();
        if request.is_empty() {
            return Ok(RequestReport {
                request_id,
                started_at,
                duration_ms: 0,
                schema: None,
                outcome: Outcome::NoRequest,
            });
        }

        tracing::info!(
            event = "request_started",
            request_id = %request_id,
            generator = self.generator.name(),
            engine = self.store.engine()
        );

        let schema = self.store.introspect().await?;
        tracing::info!(
            event = "schema_introspected",
            request_id = %request_id,
            tables = schema.tables.len()
        );

        let prompt = build_prompt(&schema, request);
        let outcome = match self.generate(&prompt, cancel).await {
            Ok(raw) => self.process(&raw).await,
            Err(outcome) => outcome,
        };

        let duration_ms = u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            event = "request_finished",
            request_id = %request_id,
            status = outcome.status(),
            duration_ms = duration_ms
        );

        Ok(RequestReport {
            request_id,
            started_at,
            duration_ms,
            schema: Some(schema),
            outcome,
        })
    }

    /// Sanitize, classify, gate and execute raw generated text.
    pub async fn process(&self, raw: &str) -> Outcome {
        let statement = sanitize(raw);
        if statement.is_empty() {
            tracing::info!(event = "statement_sanitized", empty = true);
            return Outcome::EmptyStatement;
        }
        tracing::info!(
            event = "statement_sanitized",
            empty = false,
            chars = statement.len()
        );

        let category = self.classifier.classify(&statement);
        tracing::info!(event = "statement_classified", category = %category);

        match category {
            StatementCategory::Unknown => Outcome::NeedsReview { statement },
            StatementCategory::Select => self.run_select(statement).await,
            StatementCategory::Create
            | StatementCategory::Insert
            | StatementCategory::Update
            | StatementCategory::Delete => self.run_write(statement, category).await,
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, Outcome> {
        let settings = self.config.generation_settings();
        let timeout = self.config.generation_timeout();
        let call = tokio::time::timeout(timeout, self.generator.generate(prompt, &settings));

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(event = "generation_cancelled");
                return Err(Outcome::Cancelled);
            }
            result = call => result,
        };

        let failure = match result {
            Ok(Ok(raw)) if !raw.trim().is_empty() => {
                tracing::info!(event = "generation_finished", chars = raw.len());
                return Ok(raw);
            }
            Ok(Ok(_)) => GenerationError::EmptyResponse,
            Ok(Err(err)) => err,
            Err(_) => GenerationError::Timeout(timeout),
        };

        tracing::warn!(event = "generation_failed", error = %failure);
        Err(Outcome::GenerationFailed {
            reason: failure.to_string(),
        })
    }

    async fn run_select(&self, statement: String) -> Outcome {
        if let Err(reason) = check_select(&statement) {
            tracing::warn!(event = "gate_rejected", reason = %reason);
            return Outcome::Blocked { statement, reason };
        }

        match self.store.fetch_rows(&statement).await {
            Ok(rows) => {
                tracing::info!(event = "statement_executed", category = "SELECT", rows = rows.len());
                Outcome::Rows { statement, rows }
            }
            Err(err) => execution_failed(statement, StatementCategory::Select, err),
        }
    }

    async fn run_write(&self, statement: String, category: StatementCategory) -> Outcome {
        let rows_affected = match self.store.execute(&statement).await {
            Ok(rows_affected) => rows_affected,
            Err(err) => return execution_failed(statement, category, err),
        };
        tracing::info!(
            event = "statement_executed",
            category = %category,
            rows_affected = rows_affected
        );

        let schema = match self.store.introspect().await {
            Ok(schema) => Some(schema),
            Err(err) => {
                tracing::warn!(event = "schema_refresh_failed", error = %err);
                None
            }
        };

        Outcome::Applied {
            statement,
            category,
            rows_affected,
            schema,
        }
    }
}

fn execution_failed(statement: String, category: StatementCategory, err: Error) -> Outcome {
    let error = match err {
        Error::Db(message) => message,
        other => other.to_string(),
    };
    tracing::warn!(event = "execution_failed", category = %category, error = %error);
    Outcome::ExecutionFailed {
        statement,
        category,
        error,
    }
}
