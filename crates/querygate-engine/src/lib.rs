//! Request pipeline: introspect, generate, sanitize, classify, gate, execute.
//!
//! [`Pipeline`] owns one generator and one store and turns a natural-language
//! request into a typed [`Outcome`]. Request-level failures are outcomes, not
//! errors; only a store that can not be introspected up front is an `Err`.

pub mod config;
pub mod outcome;
pub mod pipeline;

pub use config::PipelineConfig;
pub use outcome::{Outcome, RequestReport};
pub use pipeline::Pipeline;

pub use tokio_util::sync::CancellationToken;
