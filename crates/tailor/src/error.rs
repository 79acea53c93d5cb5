//! Error types for configuration loading and builds.
//!
//! Two layers, matching how a build fails:
//!
//! - [`ConfigError`]: the configuration cannot be turned into an engine.
//!   Always fatal and always raised before any content is scanned.
//! - [`BuildError`]: wraps configuration errors and the I/O of writing the
//!   stylesheet to its sink.
//!
//! Problems with individual content files are not errors; see
//! [`ScanWarning`](crate::ScanWarning).

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid YAML/JSON or does not match the schema.
    #[error("failed to parse configuration{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `content` is required and must name at least one source.
    #[error("configuration field 'content' must list at least one source")]
    EmptyContent,

    /// A content pattern is not a valid glob.
    #[error(transparent)]
    InvalidGlob(#[from] tailor_scan::ScanError),

    /// `plugins` names a plugin the catalog does not provide.
    #[error("unknown plugin '{0}'")]
    UnknownPlugin(String),

    /// `<plugin>.themes` names a preset the plugin does not contribute.
    #[error("plugin '{plugin}' has no theme preset named '{preset}' (available: {})", .available.join(", "))]
    UnknownPreset {
        plugin: String,
        preset: String,
        available: Vec<String>,
    },

    /// Two installed plugins contribute the same theme namespace.
    #[error("theme namespace '{namespace}' is contributed by both '{first}' and '{second}'")]
    DuplicateNamespace {
        namespace: String,
        first: String,
        second: String,
    },

    /// A top-level key is neither a known field nor an installed plugin.
    #[error("unknown configuration key '{0}' (not a field and not an installed plugin)")]
    UnknownKey(String),
}

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing the stylesheet to the sink failed.
    #[error("failed to write stylesheet: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting the stylesheet failed.
    #[error("failed to format stylesheet")]
    Format(#[from] std::fmt::Error),
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
