//! Rendering boundary
//!
//! The parser hands every completed section to a [`SectionSink`] as soon as
//! it is built. What the sink produces is its own business.

use ep3gen_ast::{Attributes, ImageRef, Section};

/// Error type returned by sinks
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// One page handed to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page<'a> {
    /// Synthesised cover showing the cover image
    Cover {
        section: &'a Section,
        image: &'a ImageRef,
    },
    /// Title page built from the header attributes
    DefaultTitlePage { section: &'a Section },
    /// Title page consisting of a single image
    ImageTitlePage {
        section: &'a Section,
        image: &'a ImageRef,
    },
    /// A section with buffered source lines
    Content {
        section: &'a Section,
        lines: &'a [String],
    },
}

impl<'a> Page<'a> {
    pub fn section(&self) -> &'a Section {
        match *self {
            Page::Cover { section, .. }
            | Page::DefaultTitlePage { section }
            | Page::ImageTitlePage { section, .. }
            | Page::Content { section, .. } => section,
        }
    }

    /// Buffered body lines, empty for synthesised pages
    pub fn lines(&self) -> &'a [String] {
        match *self {
            Page::Content { lines, .. } => lines,
            _ => &[],
        }
    }
}

/// Receiver of rendered pages
pub trait SectionSink {
    /// Accept one page. `attributes` is the validated header dictionary.
    fn emit(&mut self, page: &Page<'_>, attributes: &Attributes) -> Result<(), SinkError>;
}

impl<S: SectionSink + ?Sized> SectionSink for &mut S {
    fn emit(&mut self, page: &Page<'_>, attributes: &Attributes) -> Result<(), SinkError> {
        (**self).emit(page, attributes)
    }
}

/// Sink that discards every page
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SectionSink for NullSink {
    fn emit(&mut self, _page: &Page<'_>, _attributes: &Attributes) -> Result<(), SinkError> {
        Ok(())
    }
}

/// An owned copy of an emitted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPage {
    pub section: Section,
    pub lines: Vec<String>,
    pub image: Option<ImageRef>,
}

/// Sink that records every page it receives
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub pages: Vec<RecordedPage>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded page with the given identifier
    pub fn page(&self, id: &str) -> Option<&RecordedPage> {
        self.pages.iter().find(|p| p.section.id.to_string() == id)
    }
}

impl SectionSink for CollectingSink {
    fn emit(&mut self, page: &Page<'_>, _attributes: &Attributes) -> Result<(), SinkError> {
        let image = match page {
            Page::Cover { image, .. } | Page::ImageTitlePage { image, .. } => Some((*image).clone()),
            _ => None,
        };
        self.pages.push(RecordedPage {
            section: page.section().clone(),
            lines: page.lines().to_vec(),
            image,
        });
        Ok(())
    }
}
