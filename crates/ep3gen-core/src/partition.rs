//! Section partitioner
//!
//! Reshapes the flat, ordered section list into the grouping used for the
//! table of contents: front sections, then either a flat chapter list or
//! part groups with their chapters, then back sections. The grouping
//! borrows from the section list and is recomputed on every call.

use ep3gen_ast::{DirectiveKind, Section};

/// Table-of-contents grouping of a section list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc<'a> {
    /// Everything before the first part or chapter
    pub front: &'a [Section],
    pub body: Body<'a>,
    /// Everything from the end of the body onward
    pub back: &'a [Section],
}

/// Body portion of the grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    /// No parts: chapters in order
    Chapters(&'a [Section]),
    /// Each part with the chapters that follow it
    Parts(Vec<PartGroup<'a>>),
}

/// One part and its trailing chapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartGroup<'a> {
    pub part: &'a Section,
    /// Possibly empty
    pub chapters: &'a [Section],
}

impl Body<'_> {
    pub fn has_parts(&self) -> bool {
        matches!(self, Body::Parts(_))
    }

    /// Number of sections covered by the body
    pub fn len(&self) -> usize {
        match self {
            Body::Chapters(chapters) => chapters.len(),
            Body::Parts(groups) => groups.iter().map(|g| 1 + g.chapters.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `sections` into front, body and back.
///
/// With no part or chapter at all, every section is front matter.
pub fn partition(sections: &[Section]) -> Toc<'_> {
    let Some(start) = sections.iter().position(|s| s.kind.is_body()) else {
        return Toc {
            front: sections,
            body: Body::Chapters(&[]),
            back: &[],
        };
    };
    let front = &sections[..start];

    if sections[start].kind == DirectiveKind::Chapter {
        let end = sections[start..]
            .iter()
            .position(|s| s.kind != DirectiveKind::Chapter)
            .map_or(sections.len(), |offset| start + offset);
        return Toc {
            front,
            body: Body::Chapters(&sections[start..end]),
            back: &sections[end..],
        };
    }

    let mut groups = Vec::new();
    let mut part = start;
    let mut end = sections.len();
    for (index, section) in sections.iter().enumerate().skip(start + 1) {
        match section.kind {
            DirectiveKind::Chapter => {}
            DirectiveKind::Part => {
                groups.push(PartGroup {
                    part: &sections[part],
                    chapters: &sections[part + 1..index],
                });
                part = index;
            }
            _ => {
                end = index;
                break;
            }
        }
    }
    groups.push(PartGroup {
        part: &sections[part],
        chapters: &sections[part + 1..end],
    });

    Toc {
        front,
        body: Body::Parts(groups),
        back: &sections[end..],
    }
}
