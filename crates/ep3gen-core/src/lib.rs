//! ep3gen-core - Directive-driven book structure
//!
//! Core library for ep3gen: walks an annotated XHTML source document,
//! validates its directive grammar, builds the ordered section list and
//! partitions it for the table of contents.
//!
//! # Example
//!
//! ```
//! use ep3gen_core::{partition, Body, CollectingSink, Parser};
//!
//! let source = r#"<html>
//! <head>
//! <meta name="version" content="epub3">
//! <meta name="title" content="A Short Book">
//! <meta name="title-sort" content="Short Book, A">
//! <meta name="author" content="Jo Bloggs">
//! <meta name="author-sort" content="Bloggs, Jo">
//! <meta name="published" content="2022">
//! <meta name="publisher" content="Self">
//! <meta name="language" content="en">
//! <meta name="cover-image" content="cover.jpeg">
//! </head>
//! <body>
//! <!--copyright-->
//! <p>All rights reserved.</p>
//! <!--chapter-->
//! <h1>Beginning</h1>
//! <p>Once upon a time.</p>
//! <!--end-->
//! </body>
//! </html>"#;
//!
//! let mut sink = CollectingSink::new();
//! let book = Parser::from_text(source).parse(&mut sink).unwrap();
//! assert_eq!(book.sections.len(), 4);
//!
//! let toc = partition(&book.sections);
//! assert!(matches!(toc.body, Body::Chapters(chapters) if chapters.len() == 1));
//! ```

pub mod builder;
pub mod classify;
pub mod contract;
pub mod cursor;
pub mod diagnostics;
pub mod error;
pub mod metadata;
pub mod parser;
pub mod partition;
pub mod sink;

pub use builder::{extract_heading, BuiltSection, SectionBuilder};
pub use classify::{classify, is_marker};
pub use contract::{format_timestamp, validate_attributes, REQUIRED_ATTRIBUTES};
pub use cursor::LineCursor;
pub use diagnostics::{lint_book, Diagnostic, Severity};
pub use error::{ParseError, Result};
pub use parser::{parse_document, Parser, Phase, State, TitlePageMode};
pub use partition::{partition, Body, PartGroup, Toc};
pub use sink::{CollectingSink, NullSink, Page, RecordedPage, SectionSink, SinkError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
