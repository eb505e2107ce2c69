//! Structural tests for the directive grammar
//!
//! Each test builds a complete source document around a list of body lines
//! and checks the resulting section list, guides and table of contents.

use ep3gen_ast::{Book, Cardinality, DirectiveKind, Group, SectionId};
use ep3gen_core::{partition, Body, CollectingSink, NullSink, ParseError, Parser, Result};

const TIMESTAMP: &str = "2026-10-16T12:00:00Z";

fn header(extra: &[(&str, &str)]) -> Vec<String> {
    let mut lines = vec![
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>".to_string(),
        "<!DOCTYPE html>".to_string(),
        "<html xmlns=\"http://www.w3.org/1999/xhtml\">".to_string(),
        "<head>".to_string(),
        "<title>Source</title>".to_string(),
    ];
    let required = [
        ("version", "epub3"),
        ("title", "The Crystal Cave"),
        ("title-sort", "Crystal Cave, The"),
        ("author", "Mary Stewart"),
        ("author-sort", "Stewart, Mary"),
        ("published", "1970"),
        ("publisher", "Hodder & Stoughton"),
        ("language", "en"),
        ("cover-image", "cover.jpeg"),
    ];
    for (name, content) in required.iter().chain(extra.iter()) {
        lines.push(format!("  <meta name=\"{name}\" content=\"{content}\">"));
    }
    lines.push("</head>".to_string());
    lines
}

fn source_with(extra: &[(&str, &str)], directives: &[&str]) -> String {
    let mut lines = header(extra);
    lines.push("<body>".to_string());
    lines.extend(directives.iter().map(|l| l.to_string()));
    lines.push("</body>".to_string());
    lines.push("</html>".to_string());
    lines.join("\n")
}

fn source(directives: &[&str]) -> String {
    source_with(&[], directives)
}

fn parse(text: &str) -> Result<Book> {
    Parser::from_text(text)
        .with_timestamp(TIMESTAMP)
        .parse(&mut NullSink)
}

/// Expand `(directive, heading)` pairs into source lines with one paragraph each
fn sections(layout: &[(&str, &str)]) -> Vec<String> {
    let mut lines = vec![
        "<!--copyright-->".to_string(),
        "<p class=\"copy\">Copyright &#169; 1970</p>".to_string(),
    ];
    for (directive, heading) in layout {
        lines.push(format!("<!--{directive}-->"));
        lines.push(format!("<h1>{heading}</h1>"));
        lines.push(format!("<p>Text of {directive}.</p>"));
    }
    lines.push("<!--end-->".to_string());
    lines
}

fn parse_sections(layout: &[(&str, &str)]) -> Result<Book> {
    let lines = sections(layout);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    parse(&source(&refs))
}

fn ids(book: &Book) -> Vec<String> {
    book.sections.iter().map(|s| s.id.to_string()).collect()
}

#[test]
fn test_opening_sections_come_first() {
    let book = parse_sections(&[("preface", "Preface"), ("chapter", "One")]).unwrap();
    let kinds: Vec<_> = book.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        &kinds[..3],
        &[
            DirectiveKind::Cover,
            DirectiveKind::TitlePage,
            DirectiveKind::Copyright
        ]
    );
    assert_eq!(&ids(&book)[..3], &["cover", "titlepage", "copyright"]);
}

#[test]
fn test_numbered_ids_start_at_one_without_gaps() {
    let book = parse_sections(&[
        ("dedication", "For M."),
        ("part", "Book One"),
        ("chapter", "One"),
        ("chapter", "Two"),
        ("appendix", "Notes"),
    ])
    .unwrap();

    let ordinals: Vec<u32> = book
        .sections
        .iter()
        .filter_map(|s| s.id.ordinal())
        .collect();
    assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_every_at_most_once_kind_rejects_a_second_occurrence() {
    let opening = [
        DirectiveKind::Cover,
        DirectiveKind::TitlePage,
        DirectiveKind::Copyright,
    ];
    let repeatable = DirectiveKind::ALL
        .into_iter()
        .filter(|kind| kind.cardinality() == Cardinality::AtMostOnce)
        .filter(|kind| matches!(kind.group(), Group::FrontMatter | Group::BackMatter))
        .filter(|kind| !opening.contains(kind));

    let mut checked = 0;
    for kind in repeatable {
        let name = kind.name();
        let layout: Vec<(&str, &str)> = match kind.group() {
            Group::BackMatter => vec![("chapter", "One"), (name, "First"), (name, "Second")],
            _ => vec![(name, "First"), (name, "Second"), ("chapter", "One")],
        };
        match parse_sections(&layout).unwrap_err() {
            ParseError::DuplicateDirective { kind: found, .. } => assert_eq!(found, kind),
            other => panic!("{name}: expected duplicate, got {other:?}"),
        }
        checked += 1;
    }
    // eight front-matter kinds plus afterword and epilogue
    assert_eq!(checked, 10);
}

#[test]
fn test_absent_at_most_once_kinds_produce_no_section() {
    let book = parse_sections(&[("chapter", "One")]).unwrap();
    assert!(book
        .sections
        .iter()
        .all(|s| s.kind != DirectiveKind::Preface && s.kind != DirectiveKind::Epilogue));
}

#[test]
fn test_unbounded_kinds_may_repeat() {
    let book = parse_sections(&[
        ("preamble", "Note One"),
        ("preamble", "Note Two"),
        ("chapter", "One"),
        ("appendix", "A"),
        ("appendix", "B"),
    ])
    .unwrap();
    assert_eq!(book.sections.len(), 3 + 5);
}

#[test]
fn test_duplicate_afterword() {
    let err = parse_sections(&[
        ("chapter", "One"),
        ("afterword", "After"),
        ("afterword", "Again"),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        ParseError::DuplicateDirective {
            kind: DirectiveKind::Afterword,
            ..
        }
    ));
}

#[test]
fn test_no_chapter_specified() {
    let err = parse_sections(&[("preface", "Preface")]).unwrap_err();
    assert!(matches!(err, ParseError::NoChapterSpecified { .. }));

    let err = parse_sections(&[("preface", "Preface"), ("epilogue", "Later")]).unwrap_err();
    assert!(matches!(err, ParseError::NoChapterSpecified { .. }));
}

#[test]
fn test_scenario_a_flat_chapters() {
    let book = parse_sections(&[("chapter", "One"), ("chapter", "Two")]).unwrap();
    let toc = partition(&book.sections);

    assert_eq!(toc.front, &book.sections[..3]);
    assert!(toc.front.iter().all(|s| s.id.ordinal().is_none()));
    match toc.body {
        Body::Chapters(chapters) => {
            let headings: Vec<_> = chapters.iter().map(|c| c.heading.as_str()).collect();
            assert_eq!(headings, ["One", "Two"]);
        }
        Body::Parts(_) => panic!("no parts expected"),
    }
    assert!(toc.back.is_empty());
}

#[test]
fn test_scenario_b_parts() {
    let book = parse_sections(&[
        ("part", "Part One"),
        ("chapter", "One"),
        ("chapter", "Two"),
        ("part", "Part Two"),
        ("chapter", "Three"),
    ])
    .unwrap();
    let toc = partition(&book.sections);

    let Body::Parts(groups) = toc.body else {
        panic!("parts expected");
    };
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].part.heading, "Part One");
    let first: Vec<_> = groups[0].chapters.iter().map(|c| c.heading.as_str()).collect();
    assert_eq!(first, ["One", "Two"]);
    assert_eq!(groups[1].part.heading, "Part Two");
    assert_eq!(groups[1].chapters.len(), 1);
    assert_eq!(groups[1].chapters[0].heading, "Three");
}

#[test]
fn test_scenario_c_blank_heading_uses_default_label() {
    let book = parse_sections(&[("preface", "&#160;"), ("chapter", "One")]).unwrap();
    let preface = book
        .sections
        .iter()
        .find(|s| s.kind == DirectiveKind::Preface)
        .unwrap();
    assert_eq!(preface.heading, "");
    assert_eq!(preface.display_heading(), "Preface");
}

#[test]
fn test_scenario_d_duplicate_reported_on_second_occurrence() {
    let lines = sections(&[
        ("bibliography", "Works"),
        ("bibliography", "More Works"),
        ("chapter", "One"),
    ]);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let text = source(&refs);

    let second = text
        .lines()
        .enumerate()
        .filter(|(_, l)| l.trim() == "<!--bibliography-->")
        .map(|(i, _)| i + 1)
        .nth(1)
        .unwrap();

    match parse(&text).unwrap_err() {
        ParseError::DuplicateDirective { line, kind } => {
            assert_eq!(kind, DirectiveKind::Bibliography);
            assert_eq!(line, second);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_scenario_e_unknown_back_matter_directive() {
    let text = source(&[
        "<!--copyright-->",
        "<p>c</p>",
        "<!--chapter-->",
        "<h1>One</h1>",
        "<!--unknown-->",
        "<p>?</p>",
        "<!--end-->",
    ]);
    match parse(&text).unwrap_err() {
        ParseError::UnknownDirective { text, .. } => assert_eq!(text, "<!--unknown-->"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_front_matter_kind_after_chapters_is_unknown() {
    let err = parse_sections(&[("chapter", "One"), ("preface", "Late")]).unwrap_err();
    assert!(matches!(err, ParseError::UnknownDirective { .. }));
}

#[test]
fn test_end_stops_interpretation() {
    let text = source(&[
        "<!--copyright-->",
        "<p>c</p>",
        "<!--chapter-->",
        "<h1>One</h1>",
        "<!--end-->",
        "<!--chapter-->",
        "<p>never read</p>",
    ]);
    let book = parse(&text).unwrap();
    assert_eq!(book.sections.len(), 4);
}

#[test]
fn test_guides_order() {
    let book = parse_sections(&[
        ("foreword", "Foreword"),
        ("chapter", "One"),
        ("chapter", "Two"),
        ("epilogue", "Later"),
        ("appendix", "Maps"),
    ])
    .unwrap();
    let guide_ids: Vec<_> = book.guides.iter().map(|s| s.id).collect();
    assert_eq!(
        guide_ids,
        vec![
            SectionId::Fixed("cover"),
            SectionId::Fixed("titlepage"),
            SectionId::Numbered(2),
            SectionId::Numbered(4),
        ]
    );
}

#[test]
fn test_guides_without_back_matter() {
    let book = parse_sections(&[("part", "I"), ("chapter", "One")]).unwrap();
    assert_eq!(book.guides.len(), 3);
    assert_eq!(book.guides[2].kind, DirectiveKind::Part);
}

#[test]
fn test_missing_required_attribute() {
    let text = source(&["<!--copyright-->", "<p>c</p>", "<!--end-->"])
        .replace("<meta name=\"publisher\"", "<meta name=\"imprint\"");
    match parse(&text).unwrap_err() {
        ParseError::MissingAttribute { key } => assert_eq!(key, "publisher"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_malformed_meta_line() {
    let text = source(&["<!--copyright-->"]).replace(
        "<meta name=\"language\" content=\"en\">",
        "<meta name=\"language\" value=\"en\">",
    );
    assert!(matches!(
        parse(&text),
        Err(ParseError::MalformedMetadata { .. })
    ));
}

#[test]
fn test_heading_format_error() {
    let text = source(&[
        "<!--copyright-->",
        "<p>c</p>",
        "<!--chapter-->",
        "<p>Not a heading</p>",
        "<!--end-->",
    ]);
    assert!(matches!(
        parse(&text),
        Err(ParseError::HeadingFormat { .. })
    ));
}

#[test]
fn test_missing_end_directive() {
    let text = source(&["<!--copyright-->", "<p>c</p>", "<!--chapter-->", "<h1>One</h1>"]);
    // the closing </body> and </html> lines are buffered as chapter content
    assert!(matches!(
        parse(&text),
        Err(ParseError::UnexpectedEndOfInput { .. })
    ));
}

#[test]
fn test_images_attribute() {
    let lines = sections(&[("chapter", "One")]);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let text = source_with(&[("images", "map.png,crest.jpeg")], &refs);
    let book = parse(&text).unwrap();
    let names: Vec<_> = book.images.iter().map(|i| i.file_name.as_str()).collect();
    assert_eq!(names, ["map.png", "crest.jpeg"]);

    let text = source_with(&[("images", "map.png,photo.jpg")], &refs);
    assert!(matches!(
        parse(&text),
        Err(ParseError::UnsupportedImageExtension { file }) if file == "photo.jpg"
    ));
}

#[test]
fn test_timestamps() {
    let lines = sections(&[("chapter", "One")]);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let book = parse(&source(&refs)).unwrap();
    assert_eq!(book.attributes.get("created"), Some(TIMESTAMP));
    assert_eq!(book.attributes.get("modified"), Some(TIMESTAMP));

    let text = source_with(&[("created", "2022-04-13T00:00:00Z")], &refs);
    let book = parse(&text).unwrap();
    assert_eq!(book.attributes.get("created"), Some("2022-04-13T00:00:00Z"));
    assert_eq!(book.attributes.get("modified"), Some(TIMESTAMP));
}

#[test]
fn test_sink_receives_pages_in_order() {
    let lines = sections(&[("preface", "Preface"), ("chapter", "One")]);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let text = source(&refs);

    let mut sink = CollectingSink::new();
    let book = Parser::from_text(&text)
        .with_timestamp(TIMESTAMP)
        .parse(&mut sink)
        .unwrap();

    let emitted: Vec<_> = sink.pages.iter().map(|p| p.section.clone()).collect();
    assert_eq!(emitted, book.sections);

    let cover = sink.page("cover").unwrap();
    assert_eq!(cover.image.as_ref().unwrap().file_name, "cover.jpeg");

    let copyright = sink.page("copyright").unwrap();
    assert_eq!(copyright.lines, vec!["<p class=\"copy\">Copyright &#169; 1970</p>"]);

    let chapter = sink.page("section002").unwrap();
    assert_eq!(chapter.lines, vec!["<h1>One</h1>", "<p>Text of chapter.</p>"]);
}

#[test]
fn test_partition_is_pure() {
    let book = parse_sections(&[
        ("introduction", "Intro"),
        ("part", "I"),
        ("chapter", "One"),
        ("part", "II"),
        ("afterword", "After"),
    ])
    .unwrap();
    let first = partition(&book.sections);
    let second = partition(&book.sections);
    assert_eq!(first, second);
    assert_eq!(first.back.len(), 1);
}
