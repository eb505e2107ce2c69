//! Section builder
//!
//! Turns a directive and the lines following it into a [`Section`] and its
//! buffered body. The builder owns the running identifier counter for one
//! conversion; body lines are handed on to the sink without interpretation.

use std::sync::OnceLock;

use ep3gen_ast::{normalize_heading, DirectiveKind, Section, SectionId};
use regex::Regex;

use crate::classify::is_marker;
use crate::cursor::LineCursor;
use crate::error::{ParseError, Result};

/// A section together with its buffered body lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSection {
    pub section: Section,
    /// Heading line followed by every line up to the next marker
    pub lines: Vec<String>,
}

/// Allocates identifiers and builds sections
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    next_ordinal: u32,
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionBuilder {
    pub fn new() -> Self {
        Self { next_ordinal: 1 }
    }

    /// Take the next numbered identifier
    pub fn allocate_id(&mut self) -> SectionId {
        let id = SectionId::Numbered(self.next_ordinal);
        self.next_ordinal += 1;
        id
    }

    /// Number of identifiers handed out so far
    pub fn allocated(&self) -> u32 {
        self.next_ordinal - 1
    }

    /// Build a section whose heading is on the cursor's current line.
    ///
    /// On return the cursor rests on the next marker line.
    pub fn build(&mut self, kind: DirectiveKind, cursor: &mut LineCursor) -> Result<BuiltSection> {
        let heading = extract_heading(cursor.current(), cursor.line_number())?;
        let id = self.allocate_id();
        let lines = collect_body(cursor)?;
        tracing::debug!(%id, %kind, heading = %heading, lines = lines.len(), "section built");
        Ok(BuiltSection {
            section: Section::new(id, kind, heading),
            lines,
        })
    }
}

/// Extract the plain heading text from an `<h1>`..`<h3>` line.
///
/// The blank-heading sentinel yields "".
pub fn extract_heading(line: &str, line_no: usize) -> Result<String> {
    let format_error = || ParseError::HeadingFormat {
        line: line_no,
        text: line.to_string(),
    };

    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    let heading_re = HEADING_RE
        .get_or_init(|| Regex::new(r"^<h([1-3])(?:\s[^>]*)?>(.*)</h([1-3])>$").unwrap());

    let caps = heading_re.captures(line).ok_or_else(format_error)?;
    // regex has no backreferences; closing level must match the opening one
    if caps[1] != caps[3] {
        return Err(format_error());
    }
    Ok(normalize_heading(&caps[2]))
}

/// Buffer lines from the current one up to, not including, the next marker.
///
/// A current line that is itself a marker yields an empty body. Running out
/// of input before a marker is an error: every section is followed by at
/// least the end directive.
pub fn collect_body(cursor: &mut LineCursor) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    if is_marker(cursor.current()) {
        return Ok(lines);
    }
    lines.push(cursor.current().to_string());
    loop {
        let line = cursor.advance()?;
        if is_marker(line) {
            return Ok(lines);
        }
        lines.push(line.to_string());
    }
}
