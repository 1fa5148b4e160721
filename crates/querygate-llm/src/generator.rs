use async_trait::async_trait;

use crate::errors::Result;

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_output_tokens: 512,
            temperature: 0.0,
        }
    }
}

/// A source of raw text for a prompt.
///
/// Output is never trusted as SQL; callers sanitize and gate it.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Backend/model identifier for logs.
    fn name(&self) -> &str;

    /// Send one prompt and wait for one response.
    async fn generate(&self, prompt: &str, settings: &GenerationSettings) -> Result<String>;
}
