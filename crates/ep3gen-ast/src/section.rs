//! Section records
//!
//! A section is one logical unit of the book: one rendered page, one entry in
//! the manifest and the spine, one entry in the table of contents.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::directive::DirectiveKind;

/// Heading text meaning "no explicit heading"
pub const EMPTY_HEADING_SENTINELS: [&str; 3] = ["&#160;", "&nbsp;", "\u{a0}"];

/// Identifier of a section, also used as its file stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// Fixed identifier of a synthesised opening section
    Fixed(&'static str),
    /// Running counter, rendered as `section001`
    Numbered(u32),
}

impl SectionId {
    /// Counter value for numbered identifiers
    pub fn ordinal(&self) -> Option<u32> {
        match self {
            SectionId::Fixed(_) => None,
            SectionId::Numbered(n) => Some(*n),
        }
    }

    /// Name of the rendered page file
    pub fn file_name(&self) -> String {
        format!("{}.xhtml", self)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Fixed(name) => f.write_str(name),
            SectionId::Numbered(n) => write!(f, "section{:03}", n),
        }
    }
}

impl Serialize for SectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One logical section of the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Unique identifier, increasing in document order
    pub id: SectionId,
    /// Directive kind that opened the section
    pub kind: DirectiveKind,
    /// Plain heading text; empty when the source gave none
    pub heading: String,
}

impl Section {
    pub fn new(id: SectionId, kind: DirectiveKind, heading: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            heading: heading.into(),
        }
    }

    /// Heading to show in navigation, falling back to the kind's default label
    pub fn display_heading(&self) -> &str {
        if self.heading.is_empty() {
            self.kind.default_label()
        } else {
            &self.heading
        }
    }

    /// Semantic type written on the rendered page
    pub fn epub_type(&self) -> &'static str {
        self.kind.epub_type()
    }

    pub fn file_name(&self) -> String {
        self.id.file_name()
    }
}

/// Normalise extracted heading text, mapping the blank sentinel to ""
pub fn normalize_heading(text: &str) -> String {
    let text = text.trim();
    if EMPTY_HEADING_SENTINELS.contains(&text) {
        String::new()
    } else {
        text.to_string()
    }
}
