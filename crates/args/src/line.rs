//! Splitting a kickstart document into directive lines and words.

use crate::{COMMENT_PREFIX, SECTION_END, SECTION_HEADERS, SECTION_PREFIX};

/// A single directive line from a kickstart document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    /// One-based line number within the document
    pub lineno: usize,
    /// The raw text of the line
    pub text: &'a str,
}

impl<'a> DirectiveLine<'a> {
    /// Split the line into words using shell quoting rules.
    ///
    /// Returns `None` if the line has unbalanced quotes.
    pub fn words(&self) -> Option<Vec<String>> {
        split(self.text)
    }
}

/// An iterator over the directive lines of a document.
///
/// This is created by [`directive_lines`].
#[derive(Debug)]
pub struct DirectiveLines<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    in_section: bool,
}

impl<'a> Iterator for DirectiveLines<'a> {
    type Item = DirectiveLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, text) in self.lines.by_ref() {
            let trimmed = text.trim();
            if self.in_section {
                if trimmed == SECTION_END {
                    self.in_section = false;
                }
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
                continue;
            }
            if trimmed.starts_with(SECTION_PREFIX) {
                let header = trimmed.split_whitespace().next().unwrap_or_default();
                self.in_section = SECTION_HEADERS.contains(&header);
                continue;
            }
            return Some(DirectiveLine {
                lineno: idx + 1,
                text,
            });
        }
        None
    }
}

/// Returns an iterator over the directive lines of a kickstart document.
///
/// Blank lines and `#` comments are skipped, as are section bodies such
/// as `%packages` up to and including their closing `%end`.  One-line
/// `%` directives like `%include` are skipped on their own.
pub fn directive_lines(document: &str) -> DirectiveLines<'_> {
    DirectiveLines {
        lines: document.lines().enumerate(),
        in_section: false,
    }
}

/// Split a line into words using shell quoting rules.
///
/// Returns `None` if the line has unbalanced quotes.
pub fn split(line: &str) -> Option<Vec<String>> {
    shlex::split(line)
}
