//! Shared configuration loader for the relit toolchain.
//!
//! `defaults/relit.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RelitConfig`].
//!
//! Unknown keys are rejected rather than ignored.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use relit_babel::{ConvertOptions, Direction, Language, LanguageRegistry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/relit.default.toml");

/// Top-level configuration consumed by relit applications.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelitConfig {
    pub convert: ConvertConfig,
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
}

/// Defaults for every conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    pub language: String,
    pub code_indent: usize,
    pub header_marker: String,
    #[serde(default)]
    pub comment_marker: Option<String>,
    pub overwrite: OverwritePolicy,
}

/// A language known by file extension, in addition to the built-in ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageConfig {
    pub comment_marker: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// When an existing output file may be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Always.
    Yes,
    /// Only if it is not newer than the input.
    Update,
    /// Never.
    No,
}

impl RelitConfig {
    /// Built-in languages plus the configured ones (configured names win).
    pub fn registry(&self) -> LanguageRegistry {
        let mut registry = LanguageRegistry::with_defaults();
        for (name, language) in &self.languages {
            registry.register(Language {
                name: name.clone(),
                comment_marker: language.comment_marker.clone(),
                extensions: language
                    .extensions
                    .iter()
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .collect(),
            });
        }
        registry
    }

    /// Conversion options seeded from the `[convert]` table.
    pub fn convert_options(&self, direction: Direction) -> ConvertOptions {
        let cfg = &self.convert;
        ConvertOptions {
            direction,
            language: cfg.language.clone(),
            comment_marker: cfg.comment_marker.clone().filter(|m| !m.is_empty()),
            code_indent: cfg.code_indent,
            header_marker: cfg.header_marker.clone(),
            strip: false,
        }
    }
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
    pub fn build(self) -> Result<RelitConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
