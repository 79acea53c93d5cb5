//! # Tailor Scan - Content Discovery and Class Extraction
//!
//! `tailor-scan` is the front half of the `tailor` pipeline. It finds the
//! content a stylesheet has to cover and pulls candidate class names out of it.
//!
//! - [`ContentScanner`]: expands `content` globs into a deduplicated, sorted
//!   set of sources and reads them lazily
//! - [`extract`]: lexical tokenizer yielding [`Candidate`] class names
//! - [`ScanWarning`]: recoverable problems (missing directories, unreadable
//!   files) that never abort a build
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tailor_scan::ContentScanner;
//!
//! let scanner = ContentScanner::new(".", &["templates/**/*.html".into()])?;
//! for item in scanner.iter() {
//!     match item {
//!         Ok(file) => {
//!             for candidate in file.candidates() {
//!                 println!("{} @ {}: {}", file.id, candidate.offset, candidate.value);
//!             }
//!         }
//!         Err(warning) => eprintln!("warning: {}", warning),
//!     }
//! }
//! # Ok::<(), tailor_scan::ScanError>(())
//! ```
//!
//! The scanner knows nothing about markup. Every source is opaque text and the
//! extractor over-approximates on purpose: resolving candidates is the job of
//! the `tailor` crate.

mod error;
mod extractor;
mod scanner;
mod warning;

pub use error::{Result, ScanError};
pub use extractor::{extract, Candidate, Extractor};
pub use scanner::{ContentIter, ContentScanner, ContentSource, Discovery, Source, SourceFile, SourceId};
pub use warning::{ScanWarning, WarningReason};
