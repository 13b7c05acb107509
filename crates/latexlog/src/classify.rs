//! Per-line recognition of diagnostic starts.

use crate::ir::{DiagnosticRecord, Level};
use once_cell::sync::Lazy;
use regex::Regex;

static LATEX_WARNING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^LaTeX Warning: (.*)$").expect("warning pattern is valid"));
static WARNING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"line ([0-9]+)").expect("warning line pattern is valid"));
static BOX_WARNING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Over|Under)full \\(v|h)box").expect("box pattern is valid"));
static BOX_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"lines? ([0-9]+)").expect("box line pattern is valid"));

/// What a single logical line starts, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A `!` line. The record is a shell whose body is captured afterwards.
    ErrorStart(DiagnosticRecord),
    /// A complete one-line warning or box notice.
    Diagnostic(DiagnosticRecord),
    /// Anything else. Candidates for file-scope scanning.
    Plain,
}

/// Classifies `line`. Errors win over warnings, which win over box notices.
pub fn classify(line: &str, file: Option<&str>) -> LineKind {
    let file = file.map(str::to_string);

    if line.starts_with('!') {
        return LineKind::ErrorStart(DiagnosticRecord {
            line: None,
            file,
            level: Level::Error,
            message: line.chars().skip(2).collect(),
            raw: format!("{line}\n"),
            content: Some(String::new()),
        });
    }

    if let Some(caps) = LATEX_WARNING.captures(line) {
        let message = caps[1].to_string();
        return LineKind::Diagnostic(DiagnosticRecord {
            line: first_number(&WARNING_LINE, &message),
            file,
            level: Level::Warning,
            raw: message.clone(),
            message,
            content: None,
        });
    }

    if BOX_WARNING.is_match(line) {
        return LineKind::Diagnostic(DiagnosticRecord {
            line: first_number(&BOX_LINE, line),
            file,
            level: Level::Typesetting,
            message: line.to_string(),
            raw: line.to_string(),
            content: None,
        });
    }

    LineKind::Plain
}

/// First capture of `pattern` in `text` as a line number.
pub(crate) fn first_number(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}
