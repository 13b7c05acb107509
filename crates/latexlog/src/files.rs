//! File inclusion tracking.
//!
//! TeX prints `(path` when it opens a file and `)` when it closes it, mixed in
//! with ordinary text that may contain parentheses of its own. A `(` only
//! counts as a file open when the text after it looks like a path: at least
//! one `/` and no parenthesis before it. Every other `(` is tallied so its
//! `)` is not mistaken for a file close.

use crate::ir::FileNode;
use once_cell::sync::Lazy;
use regex::Regex;

static FILE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/?([^()]+/)+").expect("file path pattern is valid"));

#[derive(Debug, Clone)]
struct Node {
    path: String,
    children: Vec<usize>,
}

/// Stack and tree of the files the engine has open.
///
/// Nodes live in an arena and refer to their children by index. The list the
/// next opened file is appended to is the children of the top of the stack,
/// or the root list while the stack is empty.
#[derive(Debug, Clone, Default)]
pub struct FileScopeTracker {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    stack: Vec<usize>,
    open_parens: usize,
    current_file: Option<usize>,
}

impl FileScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the file diagnostics are attributed to right now.
    pub fn current_file(&self) -> Option<&str> {
        self.current_file.map(|idx| self.nodes[idx].path.as_str())
    }

    /// Number of file scopes on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Parentheses seen that were not file opens and are still unclosed.
    pub fn open_parens(&self) -> usize {
        self.open_parens
    }

    /// Consumes every `(` and `)` on `line`, left to right.
    pub fn scan(&mut self, line: &str) {
        let mut rest = line;
        while let Some(pos) = rest.find(['(', ')']) {
            let token = rest.as_bytes()[pos];
            rest = &rest[pos + 1..];

            if token == b'(' {
                match consume_file_path(rest) {
                    Some((path, remainder)) => {
                        self.open_file(path);
                        rest = remainder;
                    }
                    None => self.open_parens += 1,
                }
            } else {
                self.close_paren();
            }
        }
    }

    fn open_file(&mut self, path: &str) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            path: path.to_string(),
            children: Vec::new(),
        });
        match self.stack.last() {
            Some(&parent) => self.nodes[parent].children.push(idx),
            None => self.roots.push(idx),
        }
        self.stack.push(idx);
        self.current_file = Some(idx);
        log::trace!("file opened: {path}");
    }

    fn close_paren(&mut self) {
        if self.open_parens > 0 {
            self.open_parens -= 1;
            return;
        }
        if self.stack.len() > 1 {
            if let Some(closed) = self.stack.pop() {
                log::trace!("file closed: {}", self.nodes[closed].path);
            }
            self.current_file = self.stack.last().copied();
        } else {
            log::trace!("ignoring unmatched `)` at file depth {}", self.stack.len());
        }
    }

    /// Builds the owned file forest.
    pub fn into_tree(self) -> Vec<FileNode> {
        // Children are always created after their parent, so walking the
        // arena backwards finishes every child before the parent needs it.
        let mut built: Vec<Option<FileNode>> = Vec::with_capacity(self.nodes.len());
        built.resize_with(self.nodes.len(), || None);

        for (idx, node) in self.nodes.into_iter().enumerate().rev() {
            let files = node
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[idx] = Some(FileNode {
                path: node.path,
                files,
            });
        }

        self.roots
            .iter()
            .filter_map(|&root| built[root].take())
            .collect()
    }
}

/// Splits a file path off the text following a `(`.
///
/// The path runs up to the next parenthesis or the end of the line, minus
/// trailing whitespace. Returns the path and the text after it, or `None` when
/// the text does not look like a path.
fn consume_file_path(text: &str) -> Option<(&str, &str)> {
    if !FILE_PATH.is_match(text) {
        return None;
    }
    let end = text.find(['(', ')']).unwrap_or(text.len());
    let (path, rest) = text.split_at(end);
    Some((path.trim_end(), rest))
}
