//! Recoverable scan problems.
//!
//! Warnings never stop a build. They are collected while content is
//! discovered and read, then returned next to the generated stylesheet.

use std::fmt;
use std::path::PathBuf;

/// Why a content entry produced a warning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningReason {
    /// The static directory part of a glob does not exist.
    MissingDirectory,
    /// The glob was valid but matched no file.
    NoMatches,
    /// The file exists but could not be read as UTF-8 text.
    Unreadable(String),
}

/// A recoverable problem found while scanning content.
///
/// `file` is the offending path: the missing directory or unreadable file, or
/// the glob pattern itself when nothing matched. Every warning the scanner
/// produces is about a path, so the scanner always leaves `candidate` as
/// `None`. The field exists so that callers reporting warnings of their own
/// can attach the class that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanWarning {
    pub file: PathBuf,
    pub candidate: Option<String>,
    pub reason: WarningReason,
}

impl ScanWarning {
    pub fn missing_directory(path: impl Into<PathBuf>) -> Self {
        Self {
            file: path.into(),
            candidate: None,
            reason: WarningReason::MissingDirectory,
        }
    }

    pub fn no_matches(pattern: impl Into<PathBuf>) -> Self {
        Self {
            file: pattern.into(),
            candidate: None,
            reason: WarningReason::NoMatches,
        }
    }

    pub fn unreadable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: path.into(),
            candidate: None,
            reason: WarningReason::Unreadable(message.into()),
        }
    }
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningReason::MissingDirectory => write!(f, "directory does not exist"),
            WarningReason::NoMatches => write!(f, "pattern matched no files"),
            WarningReason::Unreadable(message) => write!(f, "unreadable: {}", message),
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.candidate {
            Some(candidate) => write!(
                f,
                "{} ({}): {}",
                self.file.display(),
                candidate,
                self.reason
            ),
            None => write!(f, "{}: {}", self.file.display(), self.reason),
        }
    }
}
