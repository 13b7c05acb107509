use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Severity bucket of a [`DiagnosticRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// A `!` error reported by the engine.
    Error,
    /// A `LaTeX Warning:` line.
    Warning,
    /// An over/underfull box notice.
    Typesetting,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Typesetting => "typesetting",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic extracted from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Source line in the compiled document, when the log mentions one.
    pub line: Option<u32>,
    /// File that was active when the diagnostic was printed.
    pub file: Option<String>,
    pub level: Level,
    pub message: String,
    /// Original text the record was built from. Used as the deduplication key.
    pub raw: String,
    /// Captured error body. Only errors carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A file opened by the engine, with the files it opened in turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    pub files: Vec<FileNode>,
}

impl FileNode {
    /// Creates a node without children.
    pub fn leaf(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            files: Vec::new(),
        }
    }
}

/// Final result of a parse.
///
/// Every record in a per-level bucket is the same allocation as its entry in
/// [`all`](ParseReport::all).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub errors: Vec<Arc<DiagnosticRecord>>,
    pub warnings: Vec<Arc<DiagnosticRecord>>,
    pub typesetting: Vec<Arc<DiagnosticRecord>>,
    pub all: Vec<Arc<DiagnosticRecord>>,
    pub files: Vec<FileNode>,
}

impl ParseReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Every path in the file forest, depth-first, parents before children.
    pub fn file_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        let mut stack: Vec<&FileNode> = self.files.iter().rev().collect();
        while let Some(node) = stack.pop() {
            paths.push(node.path.as_str());
            stack.extend(node.files.iter().rev());
        }
        paths
    }
}
