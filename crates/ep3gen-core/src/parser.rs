//! Structural parser
//!
//! Walks the source document as an explicit finite-state machine:
//!
//! ```text
//! Header -> Cover -> TitlePage -> Copyright
//!        -> Matter(Front)* -> Matter(Body)+ -> Matter(Back)* -> End
//! ```
//!
//! Transitions only move forward. The three matter phases share one loop;
//! what each accepts and how it leaves is described by a [`PhaseRules`]
//! table entry rather than by per-phase code.
//!
//! # Example
//!
//! ```ignore
//! use ep3gen_core::{CollectingSink, Parser};
//!
//! let mut sink = CollectingSink::new();
//! let book = Parser::from_text(&source).parse(&mut sink)?;
//! println!("{} sections", book.sections.len());
//! ```

use std::collections::HashSet;

use ep3gen_ast::{
    Attributes, Book, Cardinality, DirectiveKind, Group, ImageRef, Section, SectionId,
};

use crate::builder::{collect_body, BuiltSection, SectionBuilder};
use crate::classify::classify;
use crate::contract::{current_timestamp, resolve_image, stamp_timestamps, validate_attributes};
use crate::cursor::LineCursor;
use crate::error::{ParseError, Result};
use crate::metadata::{extract_metadata, HEAD_OPEN};
use crate::sink::{Page, SectionSink};

/// Line opening the document body
pub const BODY_OPEN: &str = "<body>";

/// Parser states, in the only order they can be visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Header,
    Cover,
    TitlePage,
    Copyright,
    Matter(Phase),
    End,
}

/// The three repeated-directive phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Front,
    Body,
    Back,
}

/// What a phase does with a line it does not accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOther {
    /// Leave the line for the next phase
    FallThrough,
    /// Fail with `UnknownDirective`
    Reject,
}

/// Static rules of one matter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRules {
    /// Directive group accepted by the phase
    pub group: Group,
    /// Handling of any other line
    pub on_other: OnOther,
    /// The phase must produce at least one section
    pub require_one: bool,
    /// The first section produced is recorded as a guide
    pub guide_first: bool,
    /// Directive that closes the phase without producing a section
    pub terminator: Option<DirectiveKind>,
    /// State entered when the phase is left
    pub next: State,
}

const FRONT_RULES: PhaseRules = PhaseRules {
    group: Group::FrontMatter,
    on_other: OnOther::FallThrough,
    require_one: false,
    guide_first: false,
    terminator: None,
    next: State::Matter(Phase::Body),
};

const BODY_RULES: PhaseRules = PhaseRules {
    group: Group::BodyMatter,
    on_other: OnOther::FallThrough,
    require_one: true,
    guide_first: true,
    terminator: None,
    next: State::Matter(Phase::Back),
};

const BACK_RULES: PhaseRules = PhaseRules {
    group: Group::BackMatter,
    on_other: OnOther::Reject,
    require_one: false,
    guide_first: true,
    terminator: Some(DirectiveKind::End),
    next: State::End,
};

impl Phase {
    pub fn rules(self) -> &'static PhaseRules {
        match self {
            Phase::Front => &FRONT_RULES,
            Phase::Body => &BODY_RULES,
            Phase::Back => &BACK_RULES,
        }
    }
}

/// How the title page is produced, from the `titlepage` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitlePageMode {
    Default,
    Custom,
    Image(String),
}

impl TitlePageMode {
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            None | Some("default") => TitlePageMode::Default,
            Some("custom") => TitlePageMode::Custom,
            Some(file) => TitlePageMode::Image(file.to_string()),
        }
    }
}

/// Mutable state of one conversion pass
#[derive(Debug, Default)]
struct Context {
    attributes: Attributes,
    cover: Option<ImageRef>,
    images: Vec<ImageRef>,
    sections: Vec<Section>,
    guides: Vec<Section>,
    seen: HashSet<DirectiveKind>,
    builder: SectionBuilder,
}

impl Context {
    fn record(&mut self, section: Section, guide: bool) {
        if guide {
            self.guides.push(section.clone());
        }
        self.sections.push(section);
    }
}

/// Directive-driven parser over one source document
#[derive(Debug)]
pub struct Parser {
    cursor: LineCursor,
    timestamp: Option<String>,
}

impl Parser {
    pub fn new(cursor: LineCursor) -> Self {
        Self {
            cursor,
            timestamp: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(LineCursor::from_text(text))
    }

    /// Use a fixed timestamp for `created`/`modified` instead of the clock
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Run the conversion, emitting each page to `sink` as it is built
    pub fn parse<S: SectionSink + ?Sized>(mut self, sink: &mut S) -> Result<Book> {
        let mut ctx = Context::default();
        let mut state = State::Header;

        while state != State::End {
            tracing::debug!(?state, line = self.cursor.line_number(), "entering state");
            state = match state {
                State::Header => self.header(&mut ctx)?,
                State::Cover => self.cover(&mut ctx, sink)?,
                State::TitlePage => self.title_page(&mut ctx, sink)?,
                State::Copyright => self.copyright(&mut ctx, sink)?,
                State::Matter(phase) => self.matter(phase, &mut ctx, sink)?,
                State::End => State::End,
            };
        }

        let cover_image = ctx.cover.ok_or(ParseError::MissingAttribute { key: "cover-image" })?;
        tracing::debug!(
            sections = ctx.sections.len(),
            guides = ctx.guides.len(),
            "document structure complete"
        );

        Ok(Book {
            attributes: ctx.attributes,
            cover_image,
            images: ctx.images,
            sections: ctx.sections,
            guides: ctx.guides,
            line_count: self.cursor.len(),
        })
    }

    fn header(&mut self, ctx: &mut Context) -> Result<State> {
        self.cursor.skip_to(HEAD_OPEN)?;
        let mut attributes = extract_metadata(&mut self.cursor)?;
        let resolved = validate_attributes(&attributes)?;

        let now = match &self.timestamp {
            Some(ts) => ts.clone(),
            None => current_timestamp(),
        };
        stamp_timestamps(&mut attributes, &now);

        ctx.attributes = attributes;
        ctx.cover = Some(resolved.cover);
        ctx.images = resolved.images;

        self.cursor.skip_to(BODY_OPEN)?;
        self.cursor.advance()?;
        Ok(State::Cover)
    }

    fn cover<S: SectionSink + ?Sized>(&mut self, ctx: &mut Context, sink: &mut S) -> Result<State> {
        let image = ctx
            .cover
            .clone()
            .ok_or(ParseError::MissingAttribute { key: "cover-image" })?;
        let section = Section::new(SectionId::Fixed("cover"), DirectiveKind::Cover, "");
        emit(
            sink,
            &Page::Cover {
                section: &section,
                image: &image,
            },
            &ctx.attributes,
        )?;
        ctx.seen.insert(DirectiveKind::Cover);
        ctx.record(section, true);
        Ok(State::TitlePage)
    }

    fn title_page<S: SectionSink + ?Sized>(
        &mut self,
        ctx: &mut Context,
        sink: &mut S,
    ) -> Result<State> {
        let section = Section::new(SectionId::Fixed("titlepage"), DirectiveKind::TitlePage, "");

        match TitlePageMode::from_attribute(ctx.attributes.get("titlepage")) {
            TitlePageMode::Default => {
                emit(sink, &Page::DefaultTitlePage { section: &section }, &ctx.attributes)?;
            }
            TitlePageMode::Custom => {
                if classify(self.cursor.current()) != Some(DirectiveKind::TitlePage) {
                    return Err(ParseError::TitlePageDirectiveExpected {
                        line: self.cursor.line_number(),
                        found: self.cursor.current().to_string(),
                    });
                }
                self.cursor.advance()?;
                let lines = collect_body(&mut self.cursor)?;
                emit(
                    sink,
                    &Page::Content {
                        section: &section,
                        lines: &lines,
                    },
                    &ctx.attributes,
                )?;
            }
            TitlePageMode::Image(file) => {
                let image = resolve_image(&file)?;
                emit(
                    sink,
                    &Page::ImageTitlePage {
                        section: &section,
                        image: &image,
                    },
                    &ctx.attributes,
                )?;
                if !ctx.images.iter().any(|i| i.file_name == image.file_name) {
                    ctx.images.push(image);
                }
            }
        }

        ctx.seen.insert(DirectiveKind::TitlePage);
        ctx.record(section, true);
        Ok(State::Copyright)
    }

    fn copyright<S: SectionSink + ?Sized>(
        &mut self,
        ctx: &mut Context,
        sink: &mut S,
    ) -> Result<State> {
        if classify(self.cursor.current()) != Some(DirectiveKind::Copyright) {
            return Err(ParseError::CopyrightDirectiveExpected {
                line: self.cursor.line_number(),
                found: self.cursor.current().to_string(),
            });
        }
        self.cursor.advance()?;
        let lines = collect_body(&mut self.cursor)?;

        let section = Section::new(SectionId::Fixed("copyright"), DirectiveKind::Copyright, "");
        emit(
            sink,
            &Page::Content {
                section: &section,
                lines: &lines,
            },
            &ctx.attributes,
        )?;
        ctx.seen.insert(DirectiveKind::Copyright);
        ctx.record(section, false);
        Ok(State::Matter(Phase::Front))
    }

    fn matter<S: SectionSink + ?Sized>(
        &mut self,
        phase: Phase,
        ctx: &mut Context,
        sink: &mut S,
    ) -> Result<State> {
        let rules = phase.rules();
        let mut produced = 0usize;

        loop {
            let line_no = self.cursor.line_number();
            let kind = match classify(self.cursor.current()) {
                Some(kind) if Some(kind) == rules.terminator => return Ok(rules.next),
                Some(kind) if kind.group() == rules.group => kind,
                _ => {
                    return match rules.on_other {
                        OnOther::FallThrough if rules.require_one && produced == 0 => {
                            Err(ParseError::NoChapterSpecified { line: line_no })
                        }
                        OnOther::FallThrough => Ok(rules.next),
                        OnOther::Reject => Err(ParseError::UnknownDirective {
                            line: line_no,
                            text: self.cursor.current().to_string(),
                        }),
                    };
                }
            };

            if kind.cardinality() == Cardinality::AtMostOnce && !ctx.seen.insert(kind) {
                return Err(ParseError::DuplicateDirective {
                    line: line_no,
                    kind,
                });
            }

            self.cursor.advance()?;
            let BuiltSection { section, lines } = ctx.builder.build(kind, &mut self.cursor)?;
            emit(
                sink,
                &Page::Content {
                    section: &section,
                    lines: &lines,
                },
                &ctx.attributes,
            )?;

            ctx.record(section, rules.guide_first && produced == 0);
            produced += 1;
        }
    }
}

fn emit<S: SectionSink + ?Sized>(sink: &mut S, page: &Page<'_>, attributes: &Attributes) -> Result<()> {
    sink.emit(page, attributes).map_err(|source| ParseError::Render {
        id: page.section().id.to_string(),
        source,
    })
}

/// Parse a whole document text with the given sink
pub fn parse_document<S: SectionSink + ?Sized>(text: &str, sink: &mut S) -> Result<Book> {
    Parser::from_text(text).parse(sink)
}
