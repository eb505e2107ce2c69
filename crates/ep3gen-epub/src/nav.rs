//! EPUB3 navigation document
//!
//! The table of contents follows the partitioned section list: front
//! sections, then parts with nested chapters (or a flat chapter list),
//! then back sections. The landmarks list is built from the guides.

use ep3gen_ast::{Book, DirectiveKind, Group, Section};
use ep3gen_core::{partition, Body};
use quick_xml::escape::escape;

use crate::xhtml::STYLESHEET_HREF;

/// File name of the navigation document inside the text directory
pub const NAV_FILE: &str = "nav.xhtml";

/// Semantic types of a guide entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmark {
    /// `epub:type` used in the EPUB3 landmarks list
    pub epub_type: &'static str,
    /// `type` used in the EPUB2 guide
    pub guide_type: &'static str,
}

/// Landmark types for a guide section
pub fn landmark(section: &Section) -> Landmark {
    match (section.kind, section.kind.group()) {
        (DirectiveKind::Cover, _) => Landmark {
            epub_type: "cover",
            guide_type: "cover",
        },
        (DirectiveKind::TitlePage, _) => Landmark {
            epub_type: "titlepage",
            guide_type: "title-page",
        },
        (_, Group::BodyMatter) => Landmark {
            epub_type: "bodymatter",
            guide_type: "text",
        },
        (_, Group::BackMatter) => Landmark {
            epub_type: "backmatter",
            guide_type: "other.backmatter",
        },
        _ => Landmark {
            epub_type: "frontmatter",
            guide_type: "other.frontmatter",
        },
    }
}

/// Render `nav.xhtml`
pub fn render_nav(book: &Book) -> String {
    let lang = escape(book.attributes.language());
    let toc = partition(&book.sections);

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE html>\n");
    out.push_str(&format!(
        "<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\" xml:lang=\"{lang}\" lang=\"{lang}\">\n"
    ));
    out.push_str("<head>\n");
    out.push_str(&format!("<title>{}</title>\n", escape(book.title())));
    out.push_str(&format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{STYLESHEET_HREF}\"/>\n"
    ));
    out.push_str("</head>\n<body epub:type=\"frontmatter\">\n");

    out.push_str("<nav epub:type=\"toc\" id=\"toc\">\n<h1>Table of Contents</h1>\n<ol>\n");
    for section in toc.front {
        push_entry(&mut out, section, 1);
        out.push_str("</li>\n");
    }
    match &toc.body {
        Body::Chapters(chapters) => {
            for chapter in *chapters {
                push_entry(&mut out, chapter, 1);
                out.push_str("</li>\n");
            }
        }
        Body::Parts(groups) => {
            for group in groups {
                push_entry(&mut out, group.part, 1);
                if !group.chapters.is_empty() {
                    out.push_str("\n  <ol>\n");
                    for chapter in group.chapters {
                        push_entry(&mut out, chapter, 2);
                        out.push_str("</li>\n");
                    }
                    out.push_str("  </ol>\n  ");
                }
                out.push_str("</li>\n");
            }
        }
    }
    for section in toc.back {
        push_entry(&mut out, section, 1);
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n</nav>\n");

    out.push_str("<nav epub:type=\"landmarks\" id=\"landmarks\" hidden=\"hidden\">\n<h2>Guide</h2>\n<ol>\n");
    for guide in &book.guides {
        out.push_str(&format!(
            "  <li><a epub:type=\"{}\" href=\"{}\">{}</a></li>\n",
            landmark(guide).epub_type,
            guide.file_name(),
            guide.display_heading()
        ));
    }
    out.push_str("</ol>\n</nav>\n</body>\n</html>\n");
    out
}

// Opens an `<li>` with its link; the caller closes it.
fn push_entry(out: &mut String, section: &Section, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!(
        "<li><a href=\"{}\">{}</a>",
        section.file_name(),
        section.display_heading()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ep3gen_ast::SectionId;

    #[test]
    fn test_landmark_types() {
        let cover = Section::new(SectionId::Fixed("cover"), DirectiveKind::Cover, "");
        assert_eq!(landmark(&cover).guide_type, "cover");

        let part = Section::new(SectionId::Numbered(1), DirectiveKind::Part, "I");
        assert_eq!(landmark(&part).epub_type, "bodymatter");

        let appendix = Section::new(SectionId::Numbered(9), DirectiveKind::Appendix, "");
        assert_eq!(landmark(&appendix).epub_type, "backmatter");
    }
}
