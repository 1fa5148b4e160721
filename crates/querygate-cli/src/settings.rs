use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use querygate_engine::PipelineConfig;
use querygate_llm::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};

use crate::{CliError, CliResult};

/// On-disk CLI settings. The API key is deliberately not part of this file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: String,
    pub model: String,
    pub base_url: String,
    pub pipeline: PipelineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: "sqlite://sample.db".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Read settings from `path`, writing the defaults there first if it is missing.
pub fn load_or_create_settings(path: &Path) -> CliResult<Settings> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = Settings::default();
    save_settings(path, &settings)?;
    tracing::info!(event = "settings_created", path = %path.display());
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> CliResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_atomic(path, encoded.as_bytes())
}

fn write_atomic(path: &Path, data: &[u8]) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> CliResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::InvalidConfig(format!("invalid settings path: {}", path.display())))?;
    Ok(path.with_file_name(format!("{}.tmp", file_name.to_string_lossy())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("querygate-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = scratch_dir("create");
        let path = dir.join("nested").join("querygate.toml");

        let settings = load_or_create_settings(&path).expect("load settings");
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        let reloaded = load_or_create_settings(&path).expect("reload settings");
        assert_eq!(reloaded, settings);
        fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let content = r#"
database = "sqlite://other.db"

[pipeline]
max_output_tokens = 256
"#;
        let settings: Settings = toml::from_str(content).expect("parse settings");
        assert_eq!(settings.database, "sqlite://other.db");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.pipeline.max_output_tokens, 256);
        assert_eq!(settings.pipeline.generation_timeout_ms, 30_000);
    }

    #[test]
    fn defaults_serialize_without_secrets() {
        let encoded = toml::to_string_pretty(&Settings::default()).expect("encode");
        assert!(encoded.contains("database = \"sqlite://sample.db\""));
        assert!(!encoded.to_ascii_lowercase().contains("api_key"));
    }

    #[test]
    fn model_is_a_top_level_setting() {
        let content = r#"
model = "models/gemini-2.5-pro"

[pipeline]
temperature = 0.2
"#;
        let settings: Settings = toml::from_str(content).expect("parse settings");
        assert_eq!(settings.model, "models/gemini-2.5-pro");
        assert_eq!(settings.pipeline.temperature, 0.2);

        let encoded = toml::to_string_pretty(&settings).expect("encode");
        let pipeline_table = encoded.split("[pipeline]").nth(1).expect("pipeline table");
        assert!(!pipeline_table.contains("model"), "encoded: {encoded}");
    }
}
