//! Content discovery over glob patterns.
//!
//! [`ContentScanner`] turns the ordered `content` list of a configuration into
//! the set of files to scan. It is built once per build and can be iterated
//! any number of times; every [`iter`](ContentScanner::iter) call rediscovers
//! the tree and reads files lazily, one at a time.
//!
//! # Pattern Rules
//!
//! | Pattern | Meaning |
//! |---------|---------|
//! | `core/templates/**/*.html` | glob relative to the root |
//! | `./core/*.html` | same, leading `./` is ignored |
//! | `!**/vendor/**` | exclude matches of every other pattern |
//! | `index.html` | a literal file, or a whole directory when it is one |
//!
//! `*` never crosses a `/` while `**` spans directories.
//!
//! # Forgiving by Default
//!
//! Template trees are often missing in partial checkouts, so a glob whose
//! directory does not exist produces a [`ScanWarning`] and the scan goes on.
//! Unreadable files are warnings too. The only hard error is a pattern that is
//! not a valid glob.
//!
//! # Determinism
//!
//! Matches are deduplicated by canonical path and emitted in sorted order, so
//! overlapping globs scan each file exactly once and neither the pattern order
//! nor the directory listing order of the OS leaks into the result.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::extractor::{extract, Extractor};
use crate::warning::ScanWarning;

/// One entry of the `content` configuration list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A glob pattern relative to the scanner root. A leading `!` excludes.
    Glob(String),
    /// Inline text scanned as if it were a file.
    Raw {
        content: String,
        /// Accepted for compatibility with configs that tag inline content
        /// with a file type. Extraction is lexical and the same for every
        /// type, so the scanner does not read it.
        extension: Option<String>,
    },
}

impl From<&str> for ContentSource {
    fn from(pattern: &str) -> Self {
        ContentSource::Glob(pattern.to_string())
    }
}

impl From<String> for ContentSource {
    fn from(pattern: String) -> Self {
        ContentSource::Glob(pattern)
    }
}

/// Where a piece of scanned text came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceId {
    File(PathBuf),
    /// Index of the raw entry among the inline entries of the configuration.
    Inline(usize),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::File(path) => write!(f, "{}", path.display()),
            SourceId::Inline(index) => write!(f, "<inline:{}>", index),
        }
    }
}

/// Text content ready for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub id: SourceId,
    pub content: String,
}

impl SourceFile {
    /// Candidate class names found in this file.
    pub fn candidates(&self) -> Extractor<'_> {
        extract(&self.content)
    }
}

/// A discovered source that has not been read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Inline { index: usize, content: String },
}

impl Source {
    pub fn id(&self) -> SourceId {
        match self {
            Source::File(path) => SourceId::File(path.clone()),
            Source::Inline { index, .. } => SourceId::Inline(*index),
        }
    }

    /// Reads the source. Failures are reported as a warning for this file only.
    pub fn load(&self) -> std::result::Result<SourceFile, ScanWarning> {
        match self {
            Source::File(path) => match std::fs::read_to_string(path) {
                Ok(content) => Ok(SourceFile {
                    id: SourceId::File(path.clone()),
                    content,
                }),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                    Err(ScanWarning::unreadable(path, err.to_string()))
                }
            },
            Source::Inline { index, content } => Ok(SourceFile {
                id: SourceId::Inline(*index),
                content: content.clone(),
            }),
        }
    }
}

/// Result of walking the content patterns.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Inline sources first, then files in sorted canonical-path order.
    pub sources: Vec<Source>,
    pub warnings: Vec<ScanWarning>,
}

#[derive(Debug, Clone)]
struct IncludePattern {
    pattern: String,
    /// Directory (or file, for literal patterns) the walk starts from.
    base: PathBuf,
    matcher: GlobMatcher,
    literal: bool,
}

/// Expands content patterns into a deduplicated, ordered set of sources.
#[derive(Debug, Clone)]
pub struct ContentScanner {
    root: PathBuf,
    include: Vec<IncludePattern>,
    exclude: GlobSet,
    inline: Vec<String>,
}

impl ContentScanner {
    /// Compiles the content patterns against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidGlob`] for a malformed pattern.
    pub fn new(root: impl Into<PathBuf>, sources: &[ContentSource]) -> Result<Self> {
        let root = root.into();
        let mut include = Vec::new();
        let mut exclude = GlobSetBuilder::new();
        let mut inline = Vec::new();

        for source in sources {
            match source {
                ContentSource::Raw { content, .. } => inline.push(content.clone()),
                ContentSource::Glob(raw) => {
                    if let Some(negated) = raw.strip_prefix('!') {
                        let pattern = normalize_pattern(negated);
                        exclude.add(compile(pattern, raw)?.glob().clone());
                        continue;
                    }

                    let pattern = normalize_pattern(raw);
                    let matcher = compile(pattern, raw)?;
                    let (prefix, literal) = static_prefix(pattern);
                    include.push(IncludePattern {
                        pattern: raw.clone(),
                        base: root.join(prefix),
                        matcher,
                        literal,
                    });
                }
            }
        }

        let exclude = exclude.build().map_err(|source| ScanError::InvalidGlob {
            pattern: "<exclusions>".to_string(),
            source,
        })?;

        Ok(Self {
            root,
            include,
            exclude,
            inline,
        })
    }

    /// Directory that relative patterns are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the patterns and returns every source to scan plus the warnings
    /// collected on the way.
    pub fn discover(&self) -> Discovery {
        let mut files = BTreeSet::new();
        let mut warnings = Vec::new();

        for include in &self.include {
            let matched = if include.literal && include.base.is_file() {
                self.add_file(include.base.as_path(), &mut files)
            } else if include.literal && !include.base.exists() {
                tracing::warn!(pattern = %include.pattern, "content pattern matched no files");
                warnings.push(ScanWarning::no_matches(&include.pattern));
                continue;
            } else if !include.base.is_dir() {
                tracing::warn!(
                    pattern = %include.pattern,
                    directory = %include.base.display(),
                    "content directory does not exist"
                );
                warnings.push(ScanWarning::missing_directory(&include.base));
                continue;
            } else {
                self.walk(include, &mut files, &mut warnings)
            };

            if matched == 0 {
                tracing::warn!(pattern = %include.pattern, "content pattern matched no files");
                warnings.push(ScanWarning::no_matches(&include.pattern));
            }
        }

        let mut sources: Vec<Source> = self
            .inline
            .iter()
            .enumerate()
            .map(|(index, content)| Source::Inline {
                index,
                content: content.clone(),
            })
            .collect();
        sources.extend(files.into_iter().map(Source::File));

        tracing::debug!(
            sources = sources.len(),
            warnings = warnings.len(),
            "content discovery finished"
        );

        Discovery { sources, warnings }
    }

    /// Returns a fresh lazy iterator over the content.
    ///
    /// Warnings from discovery come first, then one item per source. Files
    /// are read only when the iterator reaches them.
    pub fn iter(&self) -> ContentIter {
        let Discovery { sources, warnings } = self.discover();
        ContentIter {
            warnings: warnings.into_iter(),
            sources: sources.into_iter(),
        }
    }

    fn walk(
        &self,
        include: &IncludePattern,
        files: &mut BTreeSet<PathBuf>,
        warnings: &mut Vec<ScanWarning>,
    ) -> usize {
        let mut matched = 0;

        for entry in WalkDir::new(&include.base)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(include.base.as_path()).to_path_buf();
                    tracing::warn!(path = %path.display(), error = %err, "cannot walk content path");
                    warnings.push(ScanWarning::unreadable(path, err.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            // Literal directory patterns take everything below them.
            let is_match =
                include.literal || include.matcher.is_match(self.relative(entry.path()));
            if is_match {
                matched += self.add_file(entry.path(), files);
            }
        }

        matched
    }

    /// Records a matched file unless an exclusion applies. Returns 1 when the
    /// file counts as a match for its pattern.
    fn add_file(&self, path: &Path, files: &mut BTreeSet<PathBuf>) -> usize {
        if self.exclude.is_match(self.relative(path)) {
            return 0;
        }
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        files.insert(canonical);
        1
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Iterator returned by [`ContentScanner::iter`].
#[derive(Debug)]
pub struct ContentIter {
    warnings: std::vec::IntoIter<ScanWarning>,
    sources: std::vec::IntoIter<Source>,
}

impl Iterator for ContentIter {
    type Item = std::result::Result<SourceFile, ScanWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(warning) = self.warnings.next() {
            return Some(Err(warning));
        }
        self.sources.next().map(|source| source.load())
    }
}

fn normalize_pattern(pattern: &str) -> &str {
    let mut pattern = pattern.trim();
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    pattern
}

fn compile(pattern: &str, raw: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ScanError::InvalidGlob {
            pattern: raw.to_string(),
            source,
        })
}

/// Splits off the directory part of a pattern that contains no glob syntax.
///
/// Returns the prefix and whether the whole pattern is literal.
fn static_prefix(pattern: &str) -> (&str, bool) {
    match pattern.find(['*', '?', '[', '{']) {
        None => (pattern, true),
        Some(idx) => match pattern[..idx].rfind('/') {
            Some(sep) => (&pattern[..sep], false),
            None => ("", false),
        },
    }
}
