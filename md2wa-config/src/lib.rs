//! Shared configuration loader for md2wa.
//!
//! `defaults/md2wa.default.toml` is embedded into every binary so that docs and runtime behavior
//! stay in sync. Applications layer user-specific files on top of those defaults via [`Loader`]
//! before deserializing into [`Md2waConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use md2wa_core::WordLimits;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError as Error;

const DEFAULT_TOML: &str = include_str!("../defaults/md2wa.default.toml");

/// Top-level configuration consumed by md2wa applications.
#[derive(Debug, Clone, Deserialize)]
pub struct Md2waConfig {
    pub words: WordsConfig,
    pub share: ShareConfig,
    pub output: OutputConfig,
}

/// Word budget thresholds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WordsConfig {
    pub warn_at: usize,
    pub limit: usize,
}

impl WordsConfig {
    pub fn limits(&self) -> WordLimits {
        WordLimits {
            warn_at: self.warn_at,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub trailing_newline: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<Md2waConfig, ConfigError> {
        let config: Md2waConfig = self.builder.build()?.try_deserialize()?;
        if config.words.warn_at > config.words.limit {
            return Err(ConfigError::Message(format!(
                "words.warn_at ({}) must not exceed words.limit ({})",
                config.words.warn_at, config.words.limit
            )));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Md2waConfig, ConfigError> {
    Loader::new().build()
}
