//! OPF package document
//!
//! Metadata comes from the book attributes. The manifest lists the
//! navigation files, the stylesheet, every image and every section page;
//! the spine follows section order and the EPUB2 guide mirrors the guides.

use ep3gen_ast::{Attributes, Book, ImageRef};
use quick_xml::escape::escape;

use crate::nav::{landmark, NAV_FILE};
use crate::ncx::NCX_FILE;

/// Path of the package document inside the container
pub const OPF_PATH: &str = "OEBPS/package.opf";
/// Manifest id of the cover image
pub const COVER_IMAGE_ID: &str = "cover-image";

/// Render `package.opf` for a book with the given unique identifier
pub fn render_opf(book: &Book, identifier: &str) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str(&format!(
        "<package xmlns=\"http://www.idpf.org/2007/opf\" version=\"3.0\" unique-identifier=\"BookId\" xml:lang=\"{}\">\n",
        escape(book.attributes.language())
    ));

    push_metadata(&mut out, &book.attributes, identifier);
    push_manifest(&mut out, book);

    out.push_str("  <spine toc=\"ncx\">\n");
    for section in &book.sections {
        out.push_str(&format!("    <itemref idref=\"{}\"/>\n", section.id));
    }
    out.push_str("  </spine>\n");

    out.push_str("  <guide>\n");
    for guide in &book.guides {
        out.push_str(&format!(
            "    <reference type=\"{}\" title=\"{}\" href=\"Text/{}\"/>\n",
            landmark(guide).guide_type,
            escape(guide.display_heading()),
            guide.file_name()
        ));
    }
    out.push_str("  </guide>\n");

    out.push_str("</package>\n");
    out
}

fn push_metadata(out: &mut String, attributes: &Attributes, identifier: &str) {
    out.push_str("  <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:opf=\"http://www.idpf.org/2007/opf\">\n");
    out.push_str(&format!(
        "    <dc:identifier id=\"BookId\">urn:uuid:{identifier}</dc:identifier>\n"
    ));
    if let Some(isbn) = attributes.get("isbn").filter(|v| !v.is_empty()) {
        out.push_str(&format!(
            "    <dc:identifier id=\"isbn\">urn:isbn:{}</dc:identifier>\n",
            escape(isbn)
        ));
    }

    out.push_str(&format!(
        "    <dc:title id=\"title\">{}</dc:title>\n",
        escape(attributes.title())
    ));
    out.push_str(&format!(
        "    <meta refines=\"#title\" property=\"file-as\">{}</meta>\n",
        escape(attributes.get_or_empty("title-sort"))
    ));
    out.push_str(&format!(
        "    <dc:creator id=\"author\">{}</dc:creator>\n",
        escape(attributes.get_or_empty("author"))
    ));
    out.push_str(&format!(
        "    <meta refines=\"#author\" property=\"file-as\">{}</meta>\n",
        escape(attributes.get_or_empty("author-sort"))
    ));
    out.push_str("    <meta refines=\"#author\" property=\"role\" scheme=\"marc:relators\">aut</meta>\n");

    out.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape(attributes.language())
    ));
    out.push_str(&format!(
        "    <dc:publisher>{}</dc:publisher>\n",
        escape(attributes.get_or_empty("publisher"))
    ));
    out.push_str(&format!(
        "    <dc:date>{}</dc:date>\n",
        escape(attributes.get_or_empty("published"))
    ));
    if let Some(description) = attributes.get("description").filter(|v| !v.is_empty()) {
        out.push_str(&format!(
            "    <dc:description>{}</dc:description>\n",
            escape(description)
        ));
    }
    for subject in subjects(attributes) {
        out.push_str(&format!("    <dc:subject>{}</dc:subject>\n", escape(subject)));
    }
    if let Some(rights) = attributes.get("rights").filter(|v| !v.is_empty()) {
        out.push_str(&format!("    <dc:rights>{}</dc:rights>\n", escape(rights)));
    }

    if let Some(series) = attributes.get("series").filter(|v| !v.is_empty()) {
        out.push_str(&format!(
            "    <meta property=\"belongs-to-collection\" id=\"series\">{}</meta>\n",
            escape(series)
        ));
        out.push_str("    <meta refines=\"#series\" property=\"collection-type\">series</meta>\n");
        if let Some(index) = attributes.get("series-index").filter(|v| !v.is_empty()) {
            out.push_str(&format!(
                "    <meta refines=\"#series\" property=\"group-position\">{}</meta>\n",
                escape(index)
            ));
        }
    }

    out.push_str(&format!(
        "    <meta property=\"dcterms:modified\">{}</meta>\n",
        escape(attributes.get_or_empty("modified"))
    ));
    out.push_str(&format!(
        "    <meta property=\"dcterms:created\">{}</meta>\n",
        escape(attributes.get_or_empty("created"))
    ));
    out.push_str(&format!(
        "    <meta name=\"cover\" content=\"{COVER_IMAGE_ID}\"/>\n"
    ));
    out.push_str("  </metadata>\n");
}

fn push_manifest(out: &mut String, book: &Book) {
    out.push_str("  <manifest>\n");
    out.push_str(&format!(
        "    <item id=\"nav\" href=\"Text/{NAV_FILE}\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n"
    ));
    out.push_str(&format!(
        "    <item id=\"ncx\" href=\"{NCX_FILE}\" media-type=\"application/x-dtbncx+xml\"/>\n"
    ));
    out.push_str("    <item id=\"stylesheet\" href=\"Styles/stylesheet.css\" media-type=\"text/css\"/>\n");
    out.push_str(&format!(
        "    <item id=\"{COVER_IMAGE_ID}\" href=\"Images/{}\" media-type=\"{}\" properties=\"cover-image\"/>\n",
        escape(&book.cover_image.file_name),
        book.cover_image.media_type.mime()
    ));
    for (index, image) in manifest_images(book).enumerate() {
        out.push_str(&format!(
            "    <item id=\"{}\" href=\"Images/{}\" media-type=\"{}\"/>\n",
            image_id(index + 1),
            escape(&image.file_name),
            image.media_type.mime()
        ));
    }
    for section in &book.sections {
        out.push_str(&format!(
            "    <item id=\"{}\" href=\"Text/{}\" media-type=\"application/xhtml+xml\"/>\n",
            section.id,
            section.file_name()
        ));
    }
    out.push_str("  </manifest>\n");
}

/// Auxiliary images, excluding one that repeats the cover
pub fn manifest_images(book: &Book) -> impl Iterator<Item = &ImageRef> {
    book.images
        .iter()
        .filter(move |image| image.file_name != book.cover_image.file_name)
}

/// Manifest id of the auxiliary image at 1-based `position`.
///
/// Ids must be unique XML names, which file names need not be.
fn image_id(position: usize) -> String {
    format!("image{position:03}")
}

/// Subjects listed in the `subject` attribute, separated by ", "
fn subjects(attributes: &Attributes) -> impl Iterator<Item = &str> {
    attributes
        .get_or_empty("subject")
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
