//! Configuration loading, validation, and management for Memoria.
//!
//! Loads configuration from `~/.memoria/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper limit accepted for the simulated reply latency.
pub const MAX_LATENCY_MS: u64 = 60_000;

/// The root configuration structure.
///
/// Maps directly to `~/.memoria/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Assistant screen behaviour
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Shortest simulated reply delay (inclusive)
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,

    /// Longest simulated reply delay
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,

    /// First message of every session
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Example utterances offered before the first exchange
    #[serde(default = "default_suggested_prompts")]
    pub suggested_prompts: Vec<String>,

    /// Buffer size of the session event channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_latency_min_ms() -> u64 {
    1000
}
fn default_latency_max_ms() -> u64 {
    3000
}
fn default_greeting() -> String {
    "Hello! I'm your personal AI assistant. I can help you with your memories, \
     suggest activities, remind you about important dates, or just have a \
     conversation. What would you like to talk about?"
        .into()
}
fn default_suggested_prompts() -> Vec<String> {
    [
        "What should I do this weekend?",
        "Remind me about upcoming birthdays",
        "Help me plan Mom's birthday surprise",
        "What memories did I create last month?",
        "Give me a motivational quote",
        "How can I be more organized?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_event_capacity() -> usize {
    64
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
            greeting: default_greeting(),
            suggested_prompts: default_suggested_prompts(),
            event_capacity: default_event_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location with env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&path)?;

        if let Ok(value) = std::env::var("MEMORIA_LATENCY_MIN_MS") {
            config.assistant.latency_min_ms = parse_env("MEMORIA_LATENCY_MIN_MS", &value)?;
        }
        if let Ok(value) = std::env::var("MEMORIA_LATENCY_MAX_MS") {
            config.assistant.latency_max_ms = parse_env("MEMORIA_LATENCY_MAX_MS", &value)?;
        }
        if let Ok(level) = std::env::var("MEMORIA_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".memoria")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.assistant;

        if a.latency_min_ms > a.latency_max_ms {
            return Err(ConfigError::ValidationError(format!(
                "latency_min_ms ({}) must not exceed latency_max_ms ({})",
                a.latency_min_ms, a.latency_max_ms
            )));
        }

        if a.latency_max_ms > MAX_LATENCY_MS {
            return Err(ConfigError::ValidationError(format!(
                "latency_max_ms must be at most {MAX_LATENCY_MS}"
            )));
        }

        if a.event_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "event_capacity must be > 0".into(),
            ));
        }

        if a.greeting.trim().is_empty() {
            return Err(ConfigError::ValidationError("greeting must not be empty".into()));
        }

        if a.suggested_prompts.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "suggested_prompts must not contain blank entries".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_env(name: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| {
        ConfigError::ValidationError(format!("{name} must be a whole number of milliseconds, got '{value}'"))
    })
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
