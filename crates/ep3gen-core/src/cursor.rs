//! Line cursor over the source document
//!
//! The cursor owns the trimmed source lines and a read position. It starts
//! before the first line; [`LineCursor::advance`] moves to the next line and
//! fails once the stream is exhausted, since every directive mandates
//! follow-on lines.

use crate::error::{ParseError, Result};

/// Forward-only cursor over document lines
#[derive(Debug, Clone)]
pub struct LineCursor {
    /// Source lines, already trimmed
    lines: Vec<String>,
    /// Index of the current line, `None` before the first advance
    pos: Option<usize>,
}

impl LineCursor {
    /// Create a cursor from lines, trimming surrounding whitespace
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|l| l.as_ref().trim().to_string())
                .collect(),
            pos: None,
        }
    }

    /// Create a cursor from a whole text, splitting on line endings
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Move to the next line and return it
    pub fn advance(&mut self) -> Result<&str> {
        let next = self.pos.map_or(0, |p| p + 1);
        if next >= self.lines.len() {
            return Err(ParseError::UnexpectedEndOfInput {
                line: self.lines.len(),
            });
        }
        self.pos = Some(next);
        Ok(&self.lines[next])
    }

    /// The current line, or "" before the first advance
    pub fn current(&self) -> &str {
        self.pos.map_or("", |p| self.lines[p].as_str())
    }

    /// 1-based number of the current line, 0 before the first advance
    pub fn line_number(&self) -> usize {
        self.pos.map_or(0, |p| p + 1)
    }

    /// Total number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Advance until the current line equals `target`
    pub fn skip_to(&mut self, target: &str) -> Result<()> {
        while self.advance()? != target {}
        Ok(())
    }
}
