//! # Tailor - Utility-First CSS Generation
//!
//! Tailor scans templates for utility class names and emits a minimal,
//! deterministic stylesheet covering exactly the classes it found.
//!
//! ```text
//! content globs ─► scanner ─► extractor ─► resolver ─► rule set ─► emitter
//!                                             │
//!                               token store + plugin registry
//! ```
//!
//! - [`Config`]: the declarative build configuration (YAML or JSON)
//! - [`TokenStore`]: the design-token theme, built once and then read-only
//! - [`PluginRegistry`]: installed plugins contributing utilities and presets
//! - [`Resolver`]: turns a candidate such as `md:hover:bg-[#ff0000]` into a
//!   [`UtilityDescriptor`]
//! - [`RuleCollector`] / [`Ruleset`]: deduplication and total ordering
//! - [`CssEmitter`]: serialization
//!
//! ## Quick Start
//!
//! ```rust
//! use tailor::Config;
//!
//! let config = Config::from_yaml(r##"
//! content:
//!   - raw: '<div class="text-primary md:hidden">'
//! theme:
//!   extend:
//!     colors:
//!       primary: "#1e3a8a"
//! "##)?;
//!
//! let mut css = Vec::new();
//! let result = tailor::build(&config, &mut css)?;
//!
//! assert_eq!(result.generated_rule_count, 2);
//! assert_eq!(
//!     String::from_utf8(css).unwrap(),
//!     ".text-primary{color:#1e3a8a}\n@media (min-width:768px){.md\\:hidden{display:none}}\n"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Failure Model
//!
//! Configuration problems are [`ConfigError`]s and abort the build before
//! any content is read. Content problems (a glob directory that does not
//! exist, an unreadable file) are [`ScanWarning`]s returned with a complete
//! stylesheet. Candidates that do not resolve are neither: most scanned text
//! is not a class name, and it is dropped silently.
//!
//! ## Logging
//!
//! Events are emitted through `tracing`; installing a subscriber is up to the
//! caller.

mod config;
mod descriptor;
mod emit;
mod engine;
mod error;
mod modifier;
mod plugin;
mod resolver;
mod ruleset;
mod value;

pub mod tokens;
pub mod utilities;

pub use config::{Config, ContentEntry, DarkMode, PluginOptions, ThemeConfig};
pub use descriptor::{Declaration, TokenRef, UtilityDescriptor};
pub use emit::CssEmitter;
pub use engine::{build, BuildResult, Engine, Generated};
pub use error::{BuildError, ConfigError};
pub use modifier::{canonicalize, Modifier, PseudoState, Screen, Screens};
pub use plugin::{ColorScheme, ComponentLibrary, Plugin, PluginCatalog, PluginRegistry, ThemePreset};
pub use resolver::Resolver;
pub use ruleset::{Rule, RuleCollector, Ruleset};
pub use tokens::{ThemeToken, TokenStore};
pub use value::{classify, parse_arbitrary, ArbitraryValue};

pub use tailor_scan::{Candidate, ContentSource, ScanWarning, SourceId, WarningReason};
