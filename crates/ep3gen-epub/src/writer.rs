//! EPUB writer
//!
//! [`EpubWriter`] receives pages from the parser as a [`SectionSink`] and
//! collects them in an [`EpubPackage`]. Once the parse has finished,
//! [`EpubWriter::finish`] adds the navigation files, the package document
//! and the static files.
//!
//! # Example
//!
//! ```
//! use ep3gen_core::Parser;
//! use ep3gen_epub::EpubWriter;
//!
//! # fn source() -> &'static str { "" }
//! let mut writer = EpubWriter::new();
//! if let Ok(book) = Parser::from_text(source()).parse(&mut writer) {
//!     let package = writer.finish(&book)?;
//!     package.write_to_file("book.epub")?;
//! }
//! # Ok::<(), ep3gen_epub::EpubError>(())
//! ```

use std::collections::BTreeMap;

use ep3gen_ast::{Attributes, Book};
use ep3gen_core::{Page, SectionSink, SinkError};

use crate::error::{EpubError, Result};
use crate::nav::{render_nav, NAV_FILE};
use crate::ncx::{render_ncx, NCX_FILE};
use crate::opf::{manifest_images, render_opf, OPF_PATH};
use crate::package::{EpubPackage, MIMETYPE, MIMETYPE_PATH};
use crate::resources::{
    CONTAINER_PATH, CONTAINER_XML, DEFAULT_STYLESHEET, IMAGES_DIR, STYLESHEET_PATH,
};
use crate::xhtml::{render_page, TEXT_DIR};

/// Collects rendered pages and assembles the EPUB package
#[derive(Debug)]
pub struct EpubWriter {
    /// Unique book identifier, without the `urn:uuid:` prefix
    identifier: String,
    package: EpubPackage,
    /// Stylesheet override; the built-in stylesheet is used otherwise
    stylesheet: Option<String>,
    /// Image bytes keyed by file name
    images: BTreeMap<String, Vec<u8>>,
}

impl Default for EpubWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl EpubWriter {
    /// Create a writer with a fresh upper-case UUID v4 identifier
    pub fn new() -> Self {
        let identifier = uuid::Uuid::new_v4().to_string().to_uppercase();
        Self::with_identifier(identifier)
    }

    /// Create a writer with a fixed identifier
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            package: EpubPackage::new(),
            stylesheet: None,
            images: BTreeMap::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Replace the built-in stylesheet
    pub fn set_stylesheet(&mut self, css: impl Into<String>) {
        self.stylesheet = Some(css.into());
    }

    /// Supply the bytes of an image referenced by the book
    pub fn add_image(&mut self, file_name: impl Into<String>, data: Vec<u8>) {
        self.images.insert(file_name.into(), data);
    }

    /// Number of pages rendered so far
    pub fn page_count(&self) -> usize {
        self.package
            .file_list()
            .filter(|path| path.starts_with(TEXT_DIR))
            .count()
    }

    /// Add navigation, package document and static files.
    ///
    /// Every section of the book must have been emitted, and every image
    /// the book references must have been supplied with [`add_image`].
    ///
    /// [`add_image`]: EpubWriter::add_image
    pub fn finish(mut self, book: &Book) -> Result<EpubPackage> {
        for section in &book.sections {
            let path = page_path(&section.file_name());
            if !self.package.contains(&path) {
                return Err(EpubError::MissingFile(path));
            }
        }

        self.package
            .set_string(page_path(NAV_FILE), render_nav(book));
        self.package.set_string(
            format!("OEBPS/{NCX_FILE}"),
            render_ncx(book, &self.identifier),
        );
        self.package
            .set_string(OPF_PATH, render_opf(book, &self.identifier));
        tracing::info!(sections = book.sections.len(), "navigation and package document generated");

        self.package.set_string(MIMETYPE_PATH, MIMETYPE);
        self.package.set_string(CONTAINER_PATH, CONTAINER_XML);
        let stylesheet = self
            .stylesheet
            .take()
            .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());
        self.package.set_string(STYLESHEET_PATH, stylesheet);

        for image in std::iter::once(&book.cover_image).chain(manifest_images(book)) {
            let data = self
                .images
                .remove(&image.file_name)
                .ok_or_else(|| EpubError::MissingFile(image.file_name.clone()))?;
            self.package
                .set(format!("{IMAGES_DIR}/{}", image.file_name), data);
        }

        Ok(self.package)
    }
}

impl SectionSink for EpubWriter {
    fn emit(&mut self, page: &Page<'_>, attributes: &Attributes) -> std::result::Result<(), SinkError> {
        let path = page_path(&page.section().file_name());
        if self.package.contains(&path) {
            return Err(EpubError::DuplicatePage(path).into());
        }
        let html = render_page(page, attributes);
        tracing::info!(path = %path, "page generated");
        self.package.set_string(path, html);
        Ok(())
    }
}

fn page_path(file_name: &str) -> String {
    format!("{TEXT_DIR}/{file_name}")
}
