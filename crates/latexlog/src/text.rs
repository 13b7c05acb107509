//! Logical lines of a log and a cursor over them.
//!
//! TeX hard-wraps every line it writes at `max_print_line` characters. A
//! physical line that is exactly that long was almost certainly cut, so the
//! next physical line is glued back onto it. Lines the engine ends with `...`
//! on purpose are left alone.

use regex::Regex;

/// Normalized, unwrapped log text with a read cursor.
#[derive(Debug, Clone)]
pub struct LogText {
    lines: Vec<String>,
    /// Index of the last line handed out. `None` before the first read.
    row: Option<usize>,
}

impl LogText {
    pub fn new(text: &str, wrap_width: usize) -> Self {
        Self {
            lines: join_wrapped_lines(text, wrap_width),
            row: None,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Row of the last line returned by [`next_line`](Self::next_line).
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Advances one row. Returns `None` once the input is exhausted.
    pub fn next_line(&mut self) -> Option<&str> {
        let next = self.row.map_or(0, |row| row + 1);
        // Stop one past the end so repeated calls stay exhausted and a
        // rewind lands back on the last line.
        let next = next.min(self.lines.len());
        self.row = Some(next);
        self.lines.get(next).map(String::as_str)
    }

    /// Un-reads the last line returned by [`next_line`](Self::next_line).
    pub fn rewind_line(&mut self) {
        self.row = match self.row {
            Some(0) | None => None,
            Some(row) => Some(row - 1),
        };
    }

    /// Reads lines until one matches `pattern` or the input ends.
    ///
    /// The matching line is included. At least one line is consumed when any
    /// remain.
    pub fn lines_up_to_next_matching_line(&mut self, pattern: &Regex) -> Vec<String> {
        self.lines_up_to(|line| pattern.is_match(line))
    }

    /// Reads lines up to and including the next line made only of spaces.
    pub fn lines_up_to_next_whitespace_line(&mut self) -> Vec<String> {
        self.lines_up_to(|line| line.bytes().all(|b| b == b' '))
    }

    fn lines_up_to(&mut self, mut stop: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut collected = Vec::new();
        while let Some(line) = self.next_line() {
            collected.push(line.to_string());
            if stop(line) {
                break;
            }
        }
        collected
    }
}

/// Splits `text` into logical lines, undoing hard wraps at `wrap_width`.
pub fn join_wrapped_lines(text: &str, wrap_width: usize) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut physical = text.split('\n');
    let mut lines = Vec::new();

    let Some(first) = physical.next() else {
        return lines;
    };
    lines.push(first.to_string());

    let mut previous = first;
    for line in physical {
        let wrapped = previous.chars().count() == wrap_width && !previous.ends_with("...");
        match lines.last_mut() {
            Some(last) if wrapped => last.push_str(line),
            _ => lines.push(line.to_string()),
        }
        previous = line;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exactly(width: usize, fill: char) -> String {
        std::iter::repeat(fill).take(width).collect()
    }

    #[test]
    fn test_line_endings_normalized() {
        let lines = join_wrapped_lines("a\r\nb\rc\nd", 79);
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_wrapped_line_is_joined() {
        let long = exactly(79, 'x');
        let lines = join_wrapped_lines(&format!("{long}\ntail\nnext"), 79);
        assert_eq!(lines, vec![format!("{long}tail"), "next".to_string()]);
    }

    #[test]
    fn test_ellipsis_line_is_not_joined() {
        let long = format!("{}...", exactly(76, 'x'));
        let lines = join_wrapped_lines(&format!("{long}\ntail"), 79);
        assert_eq!(lines, vec![long, "tail".to_string()]);
    }

    #[test]
    fn test_other_lengths_not_joined() {
        let short = exactly(78, 'x');
        let long = exactly(80, 'y');
        let lines = join_wrapped_lines(&format!("{short}\na\n{long}\nb"), 79);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_chained_wraps() {
        let a = exactly(79, 'a');
        let b = exactly(79, 'b');
        let lines = join_wrapped_lines(&format!("start\n{a}\n{b}\nc"), 79);
        assert_eq!(lines, vec!["start".to_string(), format!("{a}{b}c")]);
    }

    #[test]
    fn test_wrap_counts_characters() {
        let long = exactly(79, 'é');
        let lines = join_wrapped_lines(&format!("{long}\ntail"), 79);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_custom_wrap_width() {
        let lines = join_wrapped_lines("abcd\nef\ngh", 4);
        assert_eq!(lines, vec!["abcdef", "gh"]);
    }

    #[test]
    fn test_cursor_reads_from_first_line() {
        let mut log = LogText::new("one\ntwo", 79);
        assert_eq!(log.row(), None);
        assert_eq!(log.next_line(), Some("one"));
        assert_eq!(log.next_line(), Some("two"));
        assert_eq!(log.next_line(), None);
        assert_eq!(log.next_line(), None);
    }

    #[test]
    fn test_rewind_unreads_one_line() {
        let mut log = LogText::new("one\ntwo\nthree", 79);
        log.next_line();
        log.next_line();
        log.rewind_line();
        assert_eq!(log.next_line(), Some("two"));

        while log.next_line().is_some() {}
        log.rewind_line();
        assert_eq!(log.next_line(), None);
        log.rewind_line();
        log.rewind_line();
        assert_eq!(log.next_line(), Some("three"));
    }

    #[test]
    fn test_lines_up_to_matching_line() {
        let mut log = LogText::new("a\nb\nl.3 x\nc", 79);
        let marker = Regex::new(r"^l\.[0-9]+").unwrap();
        assert_eq!(log.lines_up_to_next_matching_line(&marker), vec!["a", "b", "l.3 x"]);
        assert_eq!(log.next_line(), Some("c"));
    }

    #[test]
    fn test_lines_up_to_runs_out() {
        let mut log = LogText::new("a\nb", 79);
        let marker = Regex::new(r"^never").unwrap();
        assert_eq!(log.lines_up_to_next_matching_line(&marker), vec!["a", "b"]);
        assert!(log.lines_up_to_next_whitespace_line().is_empty());
    }

    #[test]
    fn test_whitespace_line_includes_blank() {
        let mut log = LogText::new("   \nrest", 79);
        assert_eq!(log.lines_up_to_next_whitespace_line(), vec!["   "]);
        assert_eq!(log.next_line(), Some("rest"));
    }
}
