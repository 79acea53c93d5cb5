//! The build pipeline.
//!
//! An [`Engine`] is assembled from a [`Config`] in a fixed order, and every
//! fatal check happens during assembly, before any content is read:
//!
//! 1. Plugins are created from the catalog and installed in `plugins` order.
//! 2. `<plugin>.themes` activates presets.
//! 3. The token store is layered: defaults, `theme.<namespace>` overrides,
//!    active preset tokens, `theme.extend`.
//! 4. Built-in patterns are registered, then each plugin's patterns.
//! 5. Content patterns are compiled.
//!
//! [`Engine::generate`] then scans every source in parallel, resolving
//! candidates into per-file collectors that are merged into one ruleset.

use std::collections::HashSet;
use std::io;

use rayon::prelude::*;
use tailor_scan::{ContentScanner, Discovery, ScanWarning};

use crate::config::Config;
use crate::emit::CssEmitter;
use crate::error::{BuildError, ConfigError};
use crate::plugin::{PluginCatalog, PluginRegistry};
use crate::resolver::Resolver;
use crate::ruleset::{RuleCollector, Ruleset};
use crate::tokens::{flatten_entries, TokenStore};
use crate::utilities::PatternIndex;

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub generated_rule_count: usize,
    /// Sorted.
    pub warnings: Vec<ScanWarning>,
}

/// A generated stylesheet with its build outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub css: String,
    pub generated_rule_count: usize,
    pub warnings: Vec<ScanWarning>,
}

/// A configured, immutable build pipeline.
#[derive(Debug)]
pub struct Engine {
    tokens: TokenStore,
    patterns: PatternIndex,
    plugins: PluginRegistry,
    scanner: ContentScanner,
    emitter: CssEmitter,
    important: bool,
    safelist: Vec<String>,
}

impl Engine {
    /// Assembles an engine with the default plugin catalog.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::with_catalog(config, &PluginCatalog::default())
    }

    /// Assembles an engine resolving `plugins` through `catalog`.
    ///
    /// # Errors
    ///
    /// Every [`ConfigError`] a configuration can produce: unknown plugins or
    /// presets, duplicate namespaces, invalid content globs.
    pub fn with_catalog(config: &Config, catalog: &PluginCatalog) -> Result<Self, ConfigError> {
        let mut plugins = PluginRegistry::new();
        for name in &config.plugins {
            plugins.install(catalog.create(name)?)?;
        }
        for name in &config.plugins {
            if let Some(options) = config.plugin_options(name) {
                plugins.activate_presets(name, &options.themes)?;
            }
        }

        let mut builder = TokenStore::builder().defaults();
        for (namespace, entries) in &config.theme.overrides {
            builder = builder.replace(namespace.clone(), flatten_entries(entries));
        }
        for token in plugins.active_tokens() {
            builder = builder.token(token.clone());
        }
        for (namespace, entries) in &config.theme.extend {
            builder = builder.extend(namespace.clone(), flatten_entries(entries));
        }
        let tokens = builder.build();

        let mut patterns = PatternIndex::with_builtins();
        for (plugin, contributed) in plugins.utilities() {
            patterns.extend(contributed, plugin);
        }

        let scanner = ContentScanner::new(config.root(), &config.content_sources())?;

        tracing::debug!(
            tokens = tokens.len(),
            patterns = patterns.len(),
            plugins = plugins.len(),
            root = %config.root().display(),
            "engine configured"
        );

        Ok(Self {
            tokens,
            patterns,
            plugins,
            scanner,
            emitter: CssEmitter::new(config.dark_mode),
            important: config.important,
            safelist: config.safelist.clone(),
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn patterns(&self) -> &PatternIndex {
        &self.patterns
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn scanner(&self) -> &ContentScanner {
        &self.scanner
    }

    /// A resolver over this engine's theme and vocabulary.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.tokens, &self.patterns).important(self.important)
    }

    /// Scans the content and returns the ordered ruleset with the warnings.
    pub fn collect(&self) -> (Ruleset, Vec<ScanWarning>) {
        let Discovery {
            sources,
            mut warnings,
        } = self.scanner.discover();
        let resolver = self.resolver();

        let (mut collector, read_warnings) = sources
            .par_iter()
            .map(|source| match source.load() {
                Ok(file) => {
                    let mut collector = RuleCollector::new();
                    let mut seen = HashSet::new();
                    for candidate in file.candidates() {
                        if !seen.insert(candidate.value) {
                            continue;
                        }
                        if let Some(descriptor) = resolver.resolve(candidate.value) {
                            collector.insert(candidate.value, descriptor);
                        }
                    }
                    (collector, Vec::new())
                }
                Err(warning) => (RuleCollector::new(), vec![warning]),
            })
            .reduce(
                || (RuleCollector::new(), Vec::new()),
                |(a, mut a_warnings), (b, b_warnings)| {
                    a_warnings.extend(b_warnings);
                    (a.merge(b), a_warnings)
                },
            );

        for class in &self.safelist {
            match resolver.resolve(class) {
                Some(descriptor) => collector.insert(class.as_str(), descriptor),
                None => tracing::debug!(class = %class, "safelisted class does not resolve"),
            }
        }

        warnings.extend(read_warnings);
        warnings.sort();

        let ruleset = collector.into_ruleset();
        tracing::info!(
            sources = sources.len(),
            rules = ruleset.len(),
            warnings = warnings.len(),
            "content scanned"
        );
        (ruleset, warnings)
    }

    /// Runs the pipeline and returns the stylesheet as a string.
    pub fn generate(&self) -> Result<Generated, BuildError> {
        let (ruleset, warnings) = self.collect();
        let css = self.emitter.emit(&ruleset)?;
        Ok(Generated {
            css,
            generated_rule_count: ruleset.len(),
            warnings,
        })
    }

    /// Runs the pipeline and writes the stylesheet to `sink`.
    ///
    /// The stylesheet is fully rendered before the sink is touched, so a
    /// failed build writes nothing.
    pub fn build<W: io::Write>(&self, sink: &mut W) -> Result<BuildResult, BuildError> {
        let generated = self.generate()?;
        sink.write_all(generated.css.as_bytes())?;
        sink.flush()?;
        Ok(BuildResult {
            generated_rule_count: generated.generated_rule_count,
            warnings: generated.warnings,
        })
    }
}

/// Builds the stylesheet for `config` into `sink` with the default catalog.
///
/// # Errors
///
/// Configuration errors abort before any content is scanned and before the
/// sink is written. Missing or unreadable content files are not errors; they
/// come back in [`BuildResult::warnings`].
pub fn build<W: io::Write>(config: &Config, sink: &mut W) -> Result<BuildResult, BuildError> {
    Engine::from_config(config)?.build(sink)
}
