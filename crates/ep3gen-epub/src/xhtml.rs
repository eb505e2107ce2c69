//! XHTML page rendering
//!
//! Every page shares one document shell. The `<body>` carries the
//! structural group as its `epub:type` and the single `<section>` carries
//! the kind's semantic type. Buffered source lines are copied verbatim;
//! attribute values taken from the header are escaped.

use ep3gen_ast::{Attributes, DirectiveKind, Section};
use ep3gen_core::Page;
use quick_xml::escape::escape;

/// Directory of page files inside the container
pub const TEXT_DIR: &str = "OEBPS/Text";
/// Stylesheet link relative to a page
pub const STYLESHEET_HREF: &str = "../Styles/stylesheet.css";

/// Render one page handed over by the parser
pub fn render_page(page: &Page<'_>, attributes: &Attributes) -> String {
    let section = page.section();
    let body = match *page {
        Page::Cover { image, .. } => format!(
            "<div class=\"cover\">\n<img src=\"../Images/{}\" alt=\"{}\"/>\n</div>\n",
            escape(&image.file_name),
            escape(attributes.title())
        ),
        Page::DefaultTitlePage { .. } => default_title_page(attributes),
        Page::ImageTitlePage { image, .. } => format!(
            "<div class=\"titlepage\">\n<img src=\"../Images/{}\" alt=\"{}\"/>\n</div>\n",
            escape(&image.file_name),
            escape(section.display_heading())
        ),
        Page::Content { lines, .. } => {
            let mut body = String::new();
            for line in lines {
                body.push_str(line);
                body.push('\n');
            }
            if section.kind == DirectiveKind::Copyright {
                body.push_str(&copyright_trailer(attributes));
            }
            body
        }
    };
    page_document(section, attributes, &body)
}

/// Wrap a section body in the shared page shell
pub fn page_document(section: &Section, attributes: &Attributes, body: &str) -> String {
    let lang = escape(attributes.language());
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE html>\n");
    out.push_str(&format!(
        "<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\" xml:lang=\"{lang}\" lang=\"{lang}\">\n"
    ));
    out.push_str("<head>\n");
    out.push_str(&format!("<title>{}</title>\n", escape(attributes.title())));
    out.push_str(&format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{STYLESHEET_HREF}\"/>\n"
    ));
    out.push_str("</head>\n");
    out.push_str(&format!(
        "<body epub:type=\"{}\">\n",
        section.kind.group().epub_type()
    ));
    out.push_str(&format!(
        "<section id=\"{}\" epub:type=\"{}\">\n",
        section.id,
        section.epub_type()
    ));
    out.push_str(body);
    out.push_str("</section>\n</body>\n</html>\n");
    out
}

fn default_title_page(attributes: &Attributes) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<h1 class=\"title\">{}</h1>\n",
        escape(attributes.title())
    ));
    if let Some(subtitle) = attributes.get("subtitle") {
        out.push_str(&format!("<h2 class=\"subtitle\">{}</h2>\n", escape(subtitle)));
    }
    if let Some(series) = attributes.get("series") {
        let series = match attributes.get("series-index") {
            Some(index) if !index.is_empty() => format!("{series} #{index}"),
            _ => series.to_string(),
        };
        out.push_str(&format!("<p class=\"series\">{}</p>\n", escape(&series)));
    }
    for key in ["author", "author2", "author3"] {
        if let Some(author) = attributes.get(key) {
            out.push_str(&format!("<p class=\"author\">{}</p>\n", escape(author)));
        }
    }
    out.push_str(&format!(
        "<p class=\"publisher\">{}</p>\n",
        escape(attributes.get_or_empty("publisher"))
    ));
    out.push_str(&format!(
        "<p class=\"published\">{}</p>\n",
        escape(attributes.get_or_empty("published"))
    ));
    out
}

fn copyright_trailer(attributes: &Attributes) -> String {
    let modified = attributes.get_or_empty("modified");
    let date = modified.get(..10).unwrap_or(modified);
    format!(
        "<p class=\"copy\">&#160;</p>\n<p class=\"copy\">This e-book generated on {}</p>\n",
        escape(date)
    )
}
