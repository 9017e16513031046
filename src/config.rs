//! Configuration for the drop-folder ingestion service.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `PAPERDROP_` and use double
//! underscores to separate nested levels:
//! - `PAPERDROP_WATCH__SETTLE_MS=250` sets `watch.settle_ms`
//! - `PAPERDROP_VAULT__ROOT=/data/vault` sets `vault.root`
//! - `PAPERDROP_SUMMARIZER__ENDPOINT=http://...` sets `summarizer.endpoint`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Name of the configuration file searched for in the working directory
/// and its ancestors.
pub const CONFIG_FILE: &str = "paperdrop.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Drop-folder watching
    #[serde(default)]
    pub watch: WatchConfig,

    /// Vault layout (where PDFs and notes land)
    #[serde(default)]
    pub vault: VaultConfig,

    /// Text-analysis pipeline bounds
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// External summarization service
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatchConfig {
    /// Directory watched for incoming PDFs (non-recursive)
    #[serde(default = "default_drop_dir")]
    pub drop_dir: PathBuf,

    /// How long a new file must sit unchanged before it is picked up
    /// (milliseconds). Covers producers that write in several bursts.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VaultConfig {
    /// Root of the note vault
    #[serde(default = "default_vault_root")]
    pub root: PathBuf,

    /// Subdirectory of the root where original PDFs are archived
    #[serde(default = "default_papers_dir")]
    pub papers_dir: String,

    /// Subdirectory of the root where generated notes are written
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineConfig {
    /// Maximum characters per summarization chunk
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,

    /// How many leading chunks are summarized (caps external calls)
    #[serde(default = "default_summary_chunk_limit")]
    pub summary_chunk_limit: usize,

    /// Number of tags ranked into each note
    #[serde(default = "default_tag_count")]
    pub tag_count: usize,

    /// Vocabulary cap for the term scorer
    #[serde(default = "default_tag_vocabulary")]
    pub tag_vocabulary: usize,

    /// Maximum characters captured after a conclusion-like heading
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SummarizerConfig {
    /// Inference endpoint, called once per chunk
    #[serde(default = "default_summarizer_endpoint")]
    pub endpoint: String,

    /// Optional bearer token sent with each request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Target summary length requested from the model
    #[serde(default = "default_summary_max_length")]
    pub max_length: usize,

    /// Minimum summary length requested from the model
    #[serde(default = "default_summary_min_length")]
    pub min_length: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides (module name -> level)
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_drop_dir() -> PathBuf {
    PathBuf::from("inbox")
}
fn default_settle_ms() -> u64 {
    1000
}
fn default_vault_root() -> PathBuf {
    PathBuf::from("vault")
}
fn default_papers_dir() -> String {
    "Papers".to_string()
}
fn default_notes_dir() -> String {
    "Notes".to_string()
}
fn default_chunk_chars() -> usize {
    1000
}
fn default_summary_chunk_limit() -> usize {
    3
}
fn default_tag_count() -> usize {
    5
}
fn default_tag_vocabulary() -> usize {
    1000
}
fn default_excerpt_chars() -> usize {
    1000
}
fn default_summarizer_endpoint() -> String {
    "https://api-inference.huggingface.co/models/sshleifer/distilbart-cnn-12-6".to_string()
}
fn default_summary_max_length() -> usize {
    150
}
fn default_summary_min_length() -> usize {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            watch: WatchConfig::default(),
            vault: VaultConfig::default(),
            pipeline: PipelineConfig::default(),
            summarizer: SummarizerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            drop_dir: default_drop_dir(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: default_vault_root(),
            papers_dir: default_papers_dir(),
            notes_dir: default_notes_dir(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_chars: default_chunk_chars(),
            summary_chunk_limit: default_summary_chunk_limit(),
            tag_count: default_tag_count(),
            tag_vocabulary: default_tag_vocabulary(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_summarizer_endpoint(),
            api_token: None,
            max_length: default_summary_max_length(),
            min_length: default_summary_min_length(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path =
            Self::find_config_file().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Layer in environment variables with PAPERDROP_ prefix
            // Use double underscore (__) to separate nested levels
            // Single underscore (_) remains as is within field names
            .merge(Env::prefixed("PAPERDROP_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the config file by searching from the current directory up to root
    fn find_config_file() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let candidate = ancestor.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        None
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path = Self::find_config_file().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !config_path.exists() {
            return Err("No configuration file found".to_string());
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                if let Err(e) = toml::from_str::<Settings>(&content) {
                    return Err(format!(
                        "Configuration file is corrupted: {e}\nRun 'paperdrop init --force' to regenerate."
                    ));
                }
            }
            Err(e) => {
                return Err(format!("Cannot read configuration file: {e}"));
            }
        }

        Ok(())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PAPERDROP_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        use anyhow::Context;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Create a default settings file in the current directory
    pub fn init_config_file(force: bool) -> anyhow::Result<PathBuf> {
        let config_path = PathBuf::from(CONFIG_FILE);

        if !force && config_path.exists() {
            anyhow::bail!("Configuration file already exists. Use --force to overwrite");
        }

        let settings = Settings::default();
        settings.save(&config_path)?;

        Ok(config_path)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.pipeline.chunk_chars == 0 {
            return Err("pipeline.chunk_chars must be at least 1".to_string());
        }

        if self.pipeline.excerpt_chars == 0 {
            return Err("pipeline.excerpt_chars must be at least 1".to_string());
        }

        if self.summarizer.min_length >= self.summarizer.max_length {
            return Err(format!(
                "summarizer.min_length ({}) must be less than summarizer.max_length ({})",
                self.summarizer.min_length, self.summarizer.max_length
            ));
        }

        if self.vault.papers_dir.is_empty() || self.vault.notes_dir.is_empty() {
            return Err("vault.papers_dir and vault.notes_dir must not be empty".to_string());
        }

        Ok(())
    }
}
