//! # ep3gen-epub
//!
//! EPUB3 rendering and packaging for ep3gen.
//!
//! This crate provides:
//! - XHTML pages for the sections handed over by the parser
//! - The navigation document, the NCX and the OPF package document
//! - An in-memory container that can be written as a `.epub` archive or
//!   as an expanded directory tree

pub mod error;
pub mod nav;
pub mod ncx;
pub mod opf;
pub mod package;
pub mod resources;
pub mod writer;
pub mod xhtml;

pub use error::{EpubError, Result};
pub use nav::{landmark, render_nav, Landmark, NAV_FILE};
pub use ncx::{render_ncx, NCX_FILE};
pub use opf::{render_opf, OPF_PATH};
pub use package::{EpubPackage, MIMETYPE, MIMETYPE_PATH};
pub use resources::{CONTAINER_PATH, DEFAULT_STYLESHEET, IMAGES_DIR, STYLESHEET_PATH};
pub use writer::EpubWriter;
pub use xhtml::{render_page, TEXT_DIR};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
