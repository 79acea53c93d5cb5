//! Build configuration.
//!
//! The document mirrors the usual utility-CSS config file:
//!
//! ```yaml
//! content:
//!   - ./core/templates/**/*.html
//!   - ./accounts/templates/**/*.html
//! theme:
//!   extend:
//!     colors:
//!       primary: "#1e3a8a"
//! plugins: [daisyui]
//! daisyui:
//!   themes: [light]
//! ```
//!
//! Every top-level key that is not a known field must name an installed
//! plugin and holds that plugin's [`PluginOptions`].
//!
//! Content globs are relative to the configuration root, which is the
//! directory of the file for [`Config::from_file`] and the current directory
//! otherwise.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tailor_scan::ContentSource;

use crate::error::ConfigError;
use crate::tokens::TokenEntries;

/// How `dark:` utilities are scoped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// `@media (prefers-color-scheme:dark)`.
    #[default]
    Media,
    /// Descendants of an element with the `dark` class.
    Class,
}

/// One `content` entry: a glob, or inline text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ContentEntry {
    Glob(String),
    Raw {
        raw: String,
        /// Passed through to the scanner; it does not change extraction.
        #[serde(default)]
        extension: Option<String>,
    },
}

impl From<&ContentEntry> for ContentSource {
    fn from(entry: &ContentEntry) -> Self {
        match entry {
            ContentEntry::Glob(pattern) => ContentSource::Glob(pattern.clone()),
            ContentEntry::Raw { raw, extension } => ContentSource::Raw {
                content: raw.clone(),
                extension: extension.clone(),
            },
        }
    }
}

/// The `theme` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThemeConfig {
    /// Merged key by key into the theme.
    #[serde(default)]
    pub extend: BTreeMap<String, TokenEntries>,
    /// Any other key replaces that namespace wholesale.
    #[serde(flatten)]
    pub overrides: BTreeMap<String, TokenEntries>,
}

/// Options under a plugin's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginOptions {
    /// Preset names to activate. The first listed is the active one.
    pub themes: Vec<String>,
}

/// A parsed and validated configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub content: Vec<ContentEntry>,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub dark_mode: DarkMode,
    /// Marks every utility important.
    #[serde(default)]
    pub important: bool,
    /// Classes generated whether or not they appear in content.
    #[serde(default)]
    pub safelist: Vec<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
    #[serde(skip)]
    plugin_options: BTreeMap<String, PluginOptions>,
    #[serde(skip)]
    root: PathBuf,
}

impl Config {
    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed documents,
    /// [`ConfigError::EmptyContent`] without content and
    /// [`ConfigError::UnknownKey`] for options of a plugin that is not listed.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        config.validated(None)
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        config.validated(None)
    }

    /// Loads a configuration file, JSON for `.json` and YAML otherwise.
    ///
    /// The root becomes the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let parsed: Result<Config, String> = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };
        let config = parsed.map_err(|message| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message,
        })?;

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(config.validated(Some(path))?.with_root(root))
    }

    /// Sets the directory content globs are resolved against.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Content entries as scanner sources.
    pub fn content_sources(&self) -> Vec<ContentSource> {
        self.content.iter().map(ContentSource::from).collect()
    }

    /// Options given for a listed plugin.
    pub fn plugin_options(&self, plugin: &str) -> Option<&PluginOptions> {
        self.plugin_options.get(plugin)
    }

    fn validated(mut self, path: Option<&Path>) -> Result<Self, ConfigError> {
        if self.content.is_empty() {
            return Err(ConfigError::EmptyContent);
        }

        for (key, value) in std::mem::take(&mut self.extra) {
            if !self.plugins.contains(&key) {
                return Err(ConfigError::UnknownKey(key));
            }
            let options: PluginOptions =
                serde_json::from_value(value).map_err(|e| ConfigError::Parse {
                    path: path.map(Path::to_path_buf),
                    message: format!("{}: {}", key, e),
                })?;
            self.plugin_options.insert(key, options);
        }

        if self.root.as_os_str().is_empty() {
            self.root = PathBuf::from(".");
        }
        Ok(self)
    }
}
