use crate::classify::{self, LineKind};
use crate::files::FileScopeTracker;
use crate::ir::{DiagnosticRecord, ParseReport};
use crate::options::ParseOptions;
use crate::report;
use crate::text::LogText;
use once_cell::sync::Lazy;
use regex::Regex;

/// The engine's `l.<N>` marker that closes the context part of an error.
static INPUT_LINE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^l\.[0-9]+").expect("marker pattern is valid"));
static INPUT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"l\.([0-9]+)").expect("input line pattern is valid"));

/// Scanner state between lines.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Normal,
    /// An error start was seen; its body is still to be read.
    InError(DiagnosticRecord),
}

/// A single-pass parser over a complete LaTeX log.
///
/// `LogParser` walks the logical lines once. In the normal state each line is
/// classified; error starts switch to the in-error state, which reads the
/// error body before going back. Lines that start nothing are scanned for file
/// opens and closes.
pub struct LogParser {
    log: LogText,
    state: State,
    files: FileScopeTracker,
    records: Vec<DiagnosticRecord>,
    options: ParseOptions,
}

impl LogParser {
    pub fn new(text: &str, options: ParseOptions) -> Self {
        Self {
            log: LogText::new(text, options.wrap_width),
            state: State::Normal,
            files: FileScopeTracker::new(),
            records: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Runs to the end of input and assembles the report.
    pub fn parse(mut self) -> ParseReport {
        while let Some(line) = self.log.next_line() {
            let line = line.to_string();
            self.step(&line);
        }

        log::debug!(
            "parsed {} logical lines: {} records, file depth {}",
            self.log.lines().len(),
            self.records.len(),
            self.files.depth()
        );

        report::assemble(self.records, self.files.into_tree(), self.options.ignore_duplicates)
    }

    fn step(&mut self, line: &str) {
        if self.state == State::Normal {
            match classify::classify(line, self.files.current_file()) {
                LineKind::ErrorStart(shell) => self.state = State::InError(shell),
                LineKind::Diagnostic(record) => self.records.push(record),
                LineKind::Plain => self.files.scan(line),
            }
        }

        if let State::InError(shell) = std::mem::replace(&mut self.state, State::Normal) {
            let error = capture_error_body(&mut self.log, shell);
            log::debug!("captured error {:?} at line {:?}", error.message, error.line);
            self.records.push(error);
        }
    }
}

/// Completes an error shell by reading its body from `log`.
///
/// The body is three blind groups: lines up to the `l.<N>` marker, then two
/// blank-line-terminated blocks. Whatever is available is taken when the
/// input runs out.
pub fn capture_error_body(log: &mut LogText, mut error: DiagnosticRecord) -> DiagnosticRecord {
    let context = log.lines_up_to_next_matching_line(&INPUT_LINE_MARKER);
    let excerpt = log.lines_up_to_next_whitespace_line();
    let trailer = log.lines_up_to_next_whitespace_line();

    let body = [context.join("\n"), excerpt.join("\n"), trailer.join("\n")].join("\n");
    error.raw.push_str(&body);
    error.line = classify::first_number(&INPUT_LINE, &error.raw);

    let mut content = error.content.take().unwrap_or_default();
    content.push_str(&body);
    error.content = Some(content);
    error
}
