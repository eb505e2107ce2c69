//! EPUB2 NCX table of contents
//!
//! Kept for reading systems that predate the navigation document. Every
//! section becomes one flat navPoint in document order.

use std::sync::OnceLock;

use ep3gen_ast::Book;
use quick_xml::escape::escape;
use regex::Regex;

/// Path of the NCX file relative to the package document
pub const NCX_FILE: &str = "toc.ncx";

/// Render `toc.ncx` for a book with the given unique identifier
pub fn render_ncx(book: &Book, identifier: &str) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str(&format!(
        "<ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\" xml:lang=\"{}\">\n",
        escape(book.attributes.language())
    ));
    out.push_str("<head>\n");
    out.push_str(&format!(
        "<meta name=\"dtb:uid\" content=\"urn:uuid:{identifier}\"/>\n"
    ));
    out.push_str("<meta name=\"dtb:depth\" content=\"1\"/>\n");
    out.push_str("<meta name=\"dtb:totalPageCount\" content=\"0\"/>\n");
    out.push_str("<meta name=\"dtb:maxPageNumber\" content=\"0\"/>\n");
    out.push_str("</head>\n");
    out.push_str(&format!(
        "<docTitle><text>{}</text></docTitle>\n",
        escape(book.title())
    ));
    if let Some(author) = book.attributes.get("author") {
        out.push_str(&format!("<docAuthor><text>{}</text></docAuthor>\n", escape(author)));
    }

    out.push_str("<navMap>\n");
    for (index, section) in book.sections.iter().enumerate() {
        let order = index + 1;
        out.push_str(&format!(
            "  <navPoint id=\"navpoint-{order}\" playOrder=\"{order}\">\n"
        ));
        out.push_str(&format!(
            "    <navLabel><text>{}</text></navLabel>\n",
            plain_label(section.display_heading())
        ));
        out.push_str(&format!(
            "    <content src=\"Text/{}\"/>\n",
            section.file_name()
        ));
        out.push_str("  </navPoint>\n");
    }
    out.push_str("</navMap>\n</ncx>\n");
    out
}

/// NCX labels are plain text: drop inline markup from a heading.
///
/// Entities already present in the heading are kept as written.
fn plain_label(heading: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    tag_re.replace_all(heading, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label() {
        assert_eq!(plain_label("A <em>Long</em> Way"), "A Long Way");
        assert_eq!(plain_label("Tom &amp; Jerry"), "Tom &amp; Jerry");
        assert_eq!(plain_label("<span class=\"x\">Part</span> I"), "Part I");
    }
}
