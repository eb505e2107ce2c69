//! ep3gen-ast - Book structure definitions
//!
//! This crate provides the data types shared by the ep3gen parser and the
//! EPUB writer: directive kinds with their static descriptors, sections,
//! the header attribute dictionary and the converted [`Book`].

pub mod directive;
pub mod document;
pub mod image;
pub mod section;

pub use directive::{Cardinality, Descriptor, DirectiveKind, Group};
pub use document::{Attributes, Book};
pub use image::{ImageRef, MediaType};
pub use section::{normalize_heading, Section, SectionId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
