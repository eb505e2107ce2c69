//! Configuration Settings
//!
//! Directory layout read from `ep3gen.toml`, with environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file searched in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "ep3gen.toml";

// Environment variables take precedence over the file
pub const ENV_SOURCE_DIR: &str = "EP3GEN_SOURCE_DIR";
pub const ENV_TARGET_DIR: &str = "EP3GEN_TARGET_DIR";
pub const ENV_RESOURCE_DIR: &str = "EP3GEN_RESOURCE_DIR";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one subdirectory per book
    pub source_dir: PathBuf,
    /// Directory receiving the generated books
    pub target_dir: PathBuf,
    /// Directory holding the stylesheet override
    pub resource_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./data/source"),
            target_dir: PathBuf::from("./data/generated"),
            resource_dir: PathBuf::from("./data/etc"),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from `path`, or from `ep3gen.toml` when no path is given.
    ///
    /// A named file must exist; a missing default file yields the defaults.
    /// Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::read_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::read_file(default_path)?
                } else {
                    tracing::warn!(
                        file = DEFAULT_CONFIG_FILE,
                        "config file not found, using default directories"
                    );
                    Self::default()
                }
            }
        };
        Ok(settings.with_overrides(|key| std::env::var(key).ok()))
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(file = %path.display(), "config loaded");
        Ok(settings)
    }

    /// Replace directories for which `lookup` returns a non-empty value
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (ENV_SOURCE_DIR, &mut self.source_dir),
            (ENV_TARGET_DIR, &mut self.target_dir),
            (ENV_RESOURCE_DIR, &mut self.resource_dir),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                tracing::debug!(key, value = %value, "directory overridden from environment");
                *field = PathBuf::from(value);
            }
        }
        self
    }

    /// Source document of a book
    pub fn source_file(&self, book: &str) -> PathBuf {
        self.source_dir.join(book).join("source.html")
    }

    /// Directory holding the images of a book
    pub fn book_source_dir(&self, book: &str) -> PathBuf {
        self.source_dir.join(book)
    }

    /// Expanded output tree of a book
    pub fn book_target_dir(&self, book: &str) -> PathBuf {
        self.target_dir.join(book)
    }

    /// Zipped output of a book
    pub fn epub_file(&self, book: &str) -> PathBuf {
        self.target_dir.join(format!("{book}.epub"))
    }

    /// Stylesheet override, if one is configured
    pub fn stylesheet_file(&self) -> PathBuf {
        self.resource_dir.join("stylesheet.css")
    }
}
