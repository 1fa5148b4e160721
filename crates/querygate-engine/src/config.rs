use std::time::Duration;

use querygate_llm::GenerationSettings;
use serde::{Deserialize, Serialize};

/// Per-pipeline settings, passed in explicitly rather than read from globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Token budget for one generated statement.
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// Upper bound on a single generation call.
    pub generation_timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 512,
            temperature: 0.0,
            generation_timeout_ms: 30_000,
        }
    }
}

impl PipelineConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }
}
