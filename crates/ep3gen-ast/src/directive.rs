//! Directive kinds and their static descriptors
//!
//! A directive is a marker line (`<!--chapter-->`) that selects which kind of
//! section begins at that point. Every kind carries a fixed descriptor:
//! its cardinality, its structural group, the semantic type written on the
//! rendered page and the label used when a section has no explicit heading.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How many times a directive kind may occur in one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// Zero or one occurrence
    AtMostOnce,
    /// Any number of occurrences
    Unbounded,
}

/// Structural group a directive kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Group {
    /// Sections placed before the main content
    FrontMatter,
    /// Parts and chapters
    BodyMatter,
    /// Sections placed after the main content
    BackMatter,
    /// Directives that steer the parser without producing a section
    Control,
}

impl Group {
    /// Value used for the `epub:type` attribute of a page body
    pub fn epub_type(self) -> &'static str {
        match self {
            Group::FrontMatter => "frontmatter",
            Group::BodyMatter => "bodymatter",
            Group::BackMatter => "backmatter",
            Group::Control => "",
        }
    }
}

/// Static properties of a directive kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Marker line recognising the directive, `None` for implicit kinds
    pub marker: Option<&'static str>,
    /// Semantic type written on the rendered section
    pub epub_type: &'static str,
    /// Allowed number of occurrences
    pub cardinality: Cardinality,
    /// Structural group
    pub group: Group,
    /// Heading used when the source gives none
    pub default_label: &'static str,
}

/// The closed set of directive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    Cover,
    TitlePage,
    Copyright,
    Bibliography,
    Acknowledgments,
    Dedication,
    Epigraph,
    Foreword,
    Introduction,
    Preface,
    Prologue,
    Preamble,
    Part,
    Chapter,
    Afterword,
    Epilogue,
    Appendix,
    End,
}

const fn descriptor(
    marker: Option<&'static str>,
    epub_type: &'static str,
    cardinality: Cardinality,
    group: Group,
    default_label: &'static str,
) -> Descriptor {
    Descriptor {
        marker,
        epub_type,
        cardinality,
        group,
        default_label,
    }
}

use Cardinality::{AtMostOnce, Unbounded};
use Group::{BackMatter, BodyMatter, Control, FrontMatter};

/// Descriptor table, indexed in declaration order of [`DirectiveKind`]
const DESCRIPTORS: [Descriptor; 18] = [
    descriptor(None, "cover", AtMostOnce, FrontMatter, "Cover Page"),
    descriptor(Some("<!--titlepage-->"), "titlepage", AtMostOnce, FrontMatter, "Title Page"),
    descriptor(Some("<!--copyright-->"), "copyright-page", AtMostOnce, FrontMatter, "Copyright"),
    descriptor(Some("<!--bibliography-->"), "bibliography", AtMostOnce, FrontMatter, "Bibliography"),
    descriptor(Some("<!--acknowledgments-->"), "acknowledgments", AtMostOnce, FrontMatter, "Acknowledgments"),
    descriptor(Some("<!--dedication-->"), "dedication", AtMostOnce, FrontMatter, "Dedication"),
    descriptor(Some("<!--epigraph-->"), "epigraph", AtMostOnce, FrontMatter, "Epigraph"),
    descriptor(Some("<!--foreword-->"), "foreword", AtMostOnce, FrontMatter, "Foreword"),
    descriptor(Some("<!--introduction-->"), "introduction", AtMostOnce, FrontMatter, "Introduction"),
    descriptor(Some("<!--preface-->"), "preface", AtMostOnce, FrontMatter, "Preface"),
    descriptor(Some("<!--prologue-->"), "prologue", AtMostOnce, FrontMatter, "Prologue"),
    descriptor(Some("<!--preamble-->"), "preamble", Unbounded, FrontMatter, "Preamble"),
    descriptor(Some("<!--part-->"), "part", Unbounded, BodyMatter, "Part"),
    descriptor(Some("<!--chapter-->"), "chapter", Unbounded, BodyMatter, "Chapter"),
    descriptor(Some("<!--afterword-->"), "afterword", AtMostOnce, BackMatter, "Afterword"),
    descriptor(Some("<!--epilogue-->"), "epilogue", AtMostOnce, BackMatter, "Epilogue"),
    descriptor(Some("<!--appendix-->"), "appendix", Unbounded, BackMatter, "Appendix"),
    descriptor(Some("<!--end-->"), "", AtMostOnce, Control, ""),
];

impl DirectiveKind {
    /// Every kind, in declaration order
    pub const ALL: [DirectiveKind; 18] = [
        DirectiveKind::Cover,
        DirectiveKind::TitlePage,
        DirectiveKind::Copyright,
        DirectiveKind::Bibliography,
        DirectiveKind::Acknowledgments,
        DirectiveKind::Dedication,
        DirectiveKind::Epigraph,
        DirectiveKind::Foreword,
        DirectiveKind::Introduction,
        DirectiveKind::Preface,
        DirectiveKind::Prologue,
        DirectiveKind::Preamble,
        DirectiveKind::Part,
        DirectiveKind::Chapter,
        DirectiveKind::Afterword,
        DirectiveKind::Epilogue,
        DirectiveKind::Appendix,
        DirectiveKind::End,
    ];

    /// Static descriptor for this kind
    pub fn descriptor(self) -> &'static Descriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Recognise a marker line. Matching is exact; no prefixes or padding.
    pub fn from_marker(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.descriptor().marker == Some(line))
    }

    pub fn marker(self) -> Option<&'static str> {
        self.descriptor().marker
    }

    pub fn epub_type(self) -> &'static str {
        self.descriptor().epub_type
    }

    pub fn cardinality(self) -> Cardinality {
        self.descriptor().cardinality
    }

    pub fn group(self) -> Group {
        self.descriptor().group
    }

    pub fn default_label(self) -> &'static str {
        self.descriptor().default_label
    }

    /// Whether the kind is a part or a chapter
    pub fn is_body(self) -> bool {
        self.group() == Group::BodyMatter
    }

    /// Short lowercase name, as used in directive markers and messages
    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Cover => "cover",
            DirectiveKind::TitlePage => "titlepage",
            DirectiveKind::Copyright => "copyright",
            DirectiveKind::Bibliography => "bibliography",
            DirectiveKind::Acknowledgments => "acknowledgments",
            DirectiveKind::Dedication => "dedication",
            DirectiveKind::Epigraph => "epigraph",
            DirectiveKind::Foreword => "foreword",
            DirectiveKind::Introduction => "introduction",
            DirectiveKind::Preface => "preface",
            DirectiveKind::Prologue => "prologue",
            DirectiveKind::Preamble => "preamble",
            DirectiveKind::Part => "part",
            DirectiveKind::Chapter => "chapter",
            DirectiveKind::Afterword => "afterword",
            DirectiveKind::Epilogue => "epilogue",
            DirectiveKind::Appendix => "appendix",
            DirectiveKind::End => "end",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
