//! Generative backends that turn a prompt into raw, untrusted text.

pub mod errors;
pub mod fake;
pub mod gemini;
pub mod generator;

pub use errors::{GenerationError, Result};
pub use fake::FakeGenerator;
pub use gemini::{GeminiClient, GeminiOptions};
pub use generator::{GenerationSettings, Generator};
