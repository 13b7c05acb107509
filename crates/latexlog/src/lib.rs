//! # latexlog
//!
//! Parser for LaTeX engine log files (`*.log`) producing structured diagnostics.
//!
//! ## Overview
//!
//! This crate turns the unstructured, line-wrapped transcript of a TeX run
//! into a [`ParseReport`]: errors, warnings, over/underfull box notices, and
//! the tree of files the engine opened. The parser handles:
//!
//! - **Line wrapping**: TeX wraps log lines at 79 characters; wrapped lines are
//!   joined back before anything else looks at them
//! - **Error bodies**: `!` errors are followed by context, an `l.<N>` source
//!   excerpt and help text, all captured into the record
//! - **File tracking**: `(path` and `)` tokens are matched into a file tree,
//!   with parentheses in ordinary text told apart by a path heuristic
//!
//! Parsing never fails. Input that does not fit the expected shape yields a
//! less precise report (missing line numbers, a flatter file tree), not an
//! error.
//!
//! ## Architecture
//!
//! ```text
//!  raw text ──► LogText ──► LogParser ──► report::assemble ──► ParseReport
//!               (unwrap,     │  normal ⇄ in-error
//!                cursor)     ├─ classify()        per line
//!                            └─ FileScopeTracker  per plain line
//! ```
//!
//! ## Examples
//!
//! ```
//! use latexlog::{parse, ParseOptions};
//!
//! let log = "(./main.tex\n\
//!            LaTeX Warning: Reference `fig:a' on page 1 undefined on input line 12.\n\
//!            )\n";
//! let report = parse(log, &ParseOptions::default());
//!
//! assert_eq!(report.warnings.len(), 1);
//! assert_eq!(report.warnings[0].line, Some(12));
//! assert_eq!(report.warnings[0].file.as_deref(), Some("./main.tex"));
//! assert_eq!(report.files[0].path, "./main.tex");
//! ```
//!
//! ### Exporting to JSON
//!
//! The report implements `serde::Serialize`:
//!
//! ```no_run
//! use latexlog::{parse, ParseOptions};
//! use std::fs;
//!
//! let log = fs::read_to_string("main.log")?;
//! let report = parse(&log, &ParseOptions::default().with_ignore_duplicates(true));
//! fs::write("report.json", serde_json::to_string_pretty(&report)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Diagnostic classification of single lines.
pub mod classify;
/// File inclusion stack and tree.
pub mod files;
/// Report data model.
pub mod ir;
/// Parse configuration.
pub mod options;
/// The two-state log scanner.
pub mod parser;
/// Deduplication and partitioning of records.
pub mod report;
/// Line unwrapping and the line cursor.
pub mod text;


pub use ir::{DiagnosticRecord, FileNode, Level, ParseReport};
pub use options::{OptionsError, ParseOptions};
pub use parser::LogParser;

/// Parses a complete log.
pub fn parse(text: &str, options: &ParseOptions) -> ParseReport {
    LogParser::new(text, options.clone()).parse()
}
