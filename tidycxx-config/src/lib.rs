//! Configuration loader for tidy-includes.
//!
//! `defaults/tidycxx.default.toml` is embedded into the binary. Projects layer a
//! `.tidy-includes.toml` from their root on top, explicit files and CLI overrides
//! come last. The result deserializes into [`TidyConfig`], which hands out the
//! [`ArrangerOptions`] and the [`IncludeSequencer`] the arranger needs.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tidycxx::{ArrangerOptions, HierarchyNode, IncludeSequencer};

const DEFAULT_TOML: &str = include_str!("../defaults/tidycxx.default.toml");

/// File name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = ".tidy-includes.toml";

/// Narrowest accepted `formatting.line_length`.
pub const MIN_LINE_LENGTH: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("formatting.line_length must be at least {minimum}, got {line_length}")]
    LineLengthTooSmall { line_length: usize, minimum: usize },
    #[error("hierarchy root {root}: node names must not be empty")]
    EmptyName { root: usize },
    #[error("hierarchy root {root}: node name '{name}' must not contain '/'")]
    NameWithSeparator { root: usize, name: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TidyConfig {
    pub formatting: FormattingConfig,
    #[serde(default)]
    pub hierarchy: Vec<RootConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub line_length: usize,
}

/// One `[[hierarchy]]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub children: Vec<NodeConfig>,
}

/// A directory known to the hierarchy, with its own known subdirectories.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    #[serde(default)]
    pub descendable: bool,
    #[serde(default)]
    pub children: Vec<NodeConfig>,
}

impl NodeConfig {
    fn register(&self, parent: &mut HierarchyNode) {
        let node = parent.insert(&self.name, self.descendable);
        for child in &self.children {
            child.register(node);
        }
    }

    fn validate(&self, root: usize) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName { root });
        }
        if self.name.contains(tidycxx::hierarchy::PATH_SEPARATOR) {
            return Err(ConfigError::NameWithSeparator {
                root,
                name: self.name.clone(),
            });
        }
        self.children
            .iter()
            .try_for_each(|child| child.validate(root))
    }
}

impl TidyConfig {
    /// Check the values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.formatting.line_length < MIN_LINE_LENGTH {
            return Err(ConfigError::LineLengthTooSmall {
                line_length: self.formatting.line_length,
                minimum: MIN_LINE_LENGTH,
            });
        }
        for (index, root) in self.hierarchy.iter().enumerate() {
            for node in &root.children {
                node.validate(index)?;
            }
        }
        Ok(())
    }

    /// Build the sequencer from the `[[hierarchy]]` tables.
    ///
    /// Panics on node names [`TidyConfig::validate`] rejects.
    pub fn sequencer(&self) -> IncludeSequencer {
        let mut sequencer = IncludeSequencer::new();
        for root in &self.hierarchy {
            let node = sequencer.add_root();
            for child in &root.children {
                child.register(node);
            }
        }
        sequencer
    }

    pub fn arranger_options(&self, source_name: Option<&str>) -> ArrangerOptions {
        let options = ArrangerOptions::default().with_line_length(self.formatting.line_length);
        match source_name {
            Some(name) => options.with_source_name(name),
            None => options,
        }
    }
}

/// Layers user settings over the built-in defaults.
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

    /// Layer `<root>/.tidy-includes.toml` if it exists.
    pub fn with_project_root(self, root: impl AsRef<Path>) -> Self {
        self.with_optional_file(root.as_ref().join(PROJECT_CONFIG_FILE))
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

    /// Apply a single key/value override (e.g. `formatting.line_length` from the CLI).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge all layers, deserialize and validate.
    pub fn build(self) -> Result<TidyConfig, ConfigError> {
        let config: TidyConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TidyConfig, ConfigError> {
    Loader::new().build()
}
