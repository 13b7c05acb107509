use latexlog::{DiagnosticRecord, FileNode, ParseReport};
use std::fmt::Write as _;

/// Human-readable rendering: one line per diagnostic, a summary, then the
/// file tree.
pub fn render_text(report: &ParseReport) -> String {
    let mut out = String::new();

    for record in &report.all {
        let _ = writeln!(out, "{}: {}: {}", location(record), record.level, record.message);
    }

    let _ = writeln!(
        out,
        "errors: {}, warnings: {}, typesetting: {}",
        report.errors.len(),
        report.warnings.len(),
        report.typesetting.len()
    );

    if !report.files.is_empty() {
        let _ = writeln!(out, "files:");
        let mut stack: Vec<(&FileNode, usize)> =
            report.files.iter().rev().map(|node| (node, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), node.path);
            stack.extend(node.files.iter().rev().map(|child| (child, depth + 1)));
        }
    }

    out
}

fn location(record: &DiagnosticRecord) -> String {
    let file = record.file.as_deref().unwrap_or("<log>");
    match record.line {
        Some(line) => format!("{file}:{line}"),
        None => file.to_string(),
    }
}
