use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::AppError;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Locale of the authored posts
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Locale of the generated mirror posts
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Where posts live on disk
    #[serde(default)]
    pub content: ContentConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate web endpoint
    #[default]
    Google,
    // @provider: Offline, returns text unchanged
    Passthrough,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Passthrough => "Passthrough",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Passthrough => "passthrough".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "passthrough" | "none" => Ok(Self::Passthrough),
            _ => Err(AppError::Config(format!("Invalid provider type: {}", s))),
        }
    }
}

/// Post tree layout: `<dir>/<year>/<slug>/<document_name>`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContentConfig {
    // @field: Root of the authored posts
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    // @field: Root of the generated mirror
    #[serde(default = "default_target_dir")]
    pub target_dir: String,

    // @field: File name of a post document inside its slug directory
    #[serde(default = "default_document_name")]
    pub document_name: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            target_dir: default_target_dir(),
            document_name: default_document_name(),
        }
    }
}

/// Translation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    // @field: Provider type
    #[serde(default)]
    pub provider: TranslationProvider,

    // @field: Service URL
    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,

    // @field: Timeout per provider call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Extra attempts after a failed call
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Base backoff, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    // @field: Max in-flight span translations per document
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Reuse translations of identical strings within a run
    #[serde(default = "default_true")]
    pub enable_cache: bool,

    // @field: Metadata key that keeps the original-language title
    #[serde(default = "default_source_title_key")]
    pub source_title_key: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: default_google_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            concurrent_requests: default_concurrent_requests(),
            enable_cache: true,
            source_title_key: default_source_title_key(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "zh".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_source_dir() -> String {
    "app/(post)/zh".to_string()
}

fn default_target_dir() -> String {
    "app/(post)/en".to_string()
}

fn default_document_name() -> String {
    "page.mdx".to_string()
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_source_title_key() -> String {
    "localizedTitle".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), AppError> {
        language_utils::validate_source_language(&self.source_language)
            .map_err(|e| AppError::Config(format!("source_language: {}", e)))?;
        language_utils::validate_language_code(&self.target_language)
            .map_err(|e| AppError::Config(format!("target_language: {}", e)))?;

        if self.content.source_dir.trim().is_empty() || self.content.target_dir.trim().is_empty() {
            return Err(AppError::Config("Content directories cannot be empty".to_string()));
        }
        if self.content.source_dir == self.content.target_dir {
            return Err(AppError::Config(format!(
                "Source and target directories must differ: {}",
                self.content.source_dir
            )));
        }
        if self.content.document_name.trim().is_empty() {
            return Err(AppError::Config("document_name cannot be empty".to_string()));
        }

        let translation = &self.translation;
        if translation.concurrent_requests == 0 {
            return Err(AppError::Config("concurrent_requests must be greater than 0".to_string()));
        }
        if translation.timeout_secs == 0 {
            return Err(AppError::Config("timeout_secs must be greater than 0".to_string()));
        }
        if translation.source_title_key.trim().is_empty() {
            return Err(AppError::Config("source_title_key cannot be empty".to_string()));
        }
        if translation.provider == TranslationProvider::Google {
            Url::parse(&translation.endpoint).map_err(|e| {
                AppError::Config(format!("Invalid endpoint '{}': {}", translation.endpoint, e))
            })?;
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config =
            serde_json::from_reader(reader).context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load a configuration file, writing the defaults first when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json).context(format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            content: ContentConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
