//! Integration tests for ep3gen CLI
//!
//! These tests run the build and check commands against a book laid out
//! in a temporary source directory.

use std::fs;
use std::path::Path;

use ep3gen_cli::{build_command, check_command, CheckReport, OutputFormat, PackageFormat, Settings};
use tempfile::TempDir;
use zip::read::ZipArchive;
use zip::CompressionMethod;

const SOURCE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title>The Last Enchantment</title>
<meta name="version" content="epub3">
<meta name="title" content="The Last Enchantment">
<meta name="title-sort" content="Last Enchantment, The">
<meta name="author" content="Mary Stewart">
<meta name="author-sort" content="Stewart, Mary">
<meta name="published" content="1979">
<meta name="publisher" content="Hodder">
<meta name="language" content="en">
<meta name="cover-image" content="cover.jpeg">
<meta name="images" content="map.png">
</head>
<body>
<!--copyright-->
<p>Copyright &#169; 1979 Mary Stewart</p>
<!--chapter-->
<h1>Chapter One</h1>
<p>The first chapter.</p>
<!--chapter-->
<h1>Chapter Two</h1>
<p>The second chapter.</p>
<!--epilogue-->
<h1>Epilogue</h1>
<p>The end.</p>
<!--end-->
</body>
</html>
"#;

/// Lay out a source, resource and target directory for one book
fn setup(source: &str) -> (TempDir, Settings) {
    let root = TempDir::new().unwrap();
    let settings = Settings {
        source_dir: root.path().join("source"),
        target_dir: root.path().join("generated"),
        resource_dir: root.path().join("etc"),
    };
    let book_dir = settings.book_source_dir("enchantment");
    fs::create_dir_all(&book_dir).unwrap();
    fs::write(book_dir.join("source.html"), source).unwrap();
    fs::write(book_dir.join("cover.jpeg"), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    fs::write(book_dir.join("map.png"), [0x89, b'P', b'N', b'G']).unwrap();
    (root, settings)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_build_directory_tree() {
    let (_root, settings) = setup(SOURCE);
    let summary = build_command("enchantment", &settings, PackageFormat::Dir).unwrap();

    assert_eq!(summary.line_count, SOURCE.lines().count());
    // cover, titlepage, copyright, two chapters, epilogue
    assert_eq!(summary.section_count, 6);

    let tree = settings.book_target_dir("enchantment");
    assert_eq!(summary.outputs, vec![tree.clone()]);
    assert_eq!(read(&tree.join("mimetype")), "application/epub+zip");
    for file in [
        "META-INF/container.xml",
        "OEBPS/package.opf",
        "OEBPS/toc.ncx",
        "OEBPS/Text/nav.xhtml",
        "OEBPS/Text/cover.xhtml",
        "OEBPS/Text/titlepage.xhtml",
        "OEBPS/Text/copyright.xhtml",
        "OEBPS/Text/section001.xhtml",
        "OEBPS/Text/section002.xhtml",
        "OEBPS/Text/section003.xhtml",
        "OEBPS/Styles/stylesheet.css",
        "OEBPS/Images/cover.jpeg",
        "OEBPS/Images/map.png",
    ] {
        assert!(tree.join(file).is_file(), "missing {file}");
    }
    assert!(!settings.epub_file("enchantment").exists());

    let chapter = read(&tree.join("OEBPS/Text/section001.xhtml"));
    assert!(chapter.contains("<h1>Chapter One</h1>\n<p>The first chapter.</p>"));
}

#[test]
fn test_build_replaces_previous_tree() {
    let (_root, settings) = setup(SOURCE);
    let tree = settings.book_target_dir("enchantment");
    fs::create_dir_all(tree.join("OEBPS/Text")).unwrap();
    fs::write(tree.join("OEBPS/Text/section099.xhtml"), "stale").unwrap();

    build_command("enchantment", &settings, PackageFormat::Dir).unwrap();
    assert!(!tree.join("OEBPS/Text/section099.xhtml").exists());
    assert!(tree.join("OEBPS/Text/section001.xhtml").is_file());
}

#[test]
fn test_build_epub_archive() {
    let (_root, settings) = setup(SOURCE);
    let summary = build_command("enchantment", &settings, PackageFormat::Epub).unwrap();

    let epub = settings.epub_file("enchantment");
    assert_eq!(summary.outputs, vec![epub.clone()]);
    assert!(!settings.book_target_dir("enchantment").exists());

    let mut archive = ZipArchive::new(fs::File::open(&epub).unwrap()).unwrap();
    {
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
    }
    assert!(archive.by_name("OEBPS/package.opf").is_ok());
    assert!(archive.by_name("OEBPS/Images/map.png").is_ok());
}

#[test]
fn test_build_both_outputs() {
    let (_root, settings) = setup(SOURCE);
    let summary = build_command("enchantment", &settings, PackageFormat::Both).unwrap();
    assert_eq!(summary.outputs.len(), 2);
    assert!(settings.book_target_dir("enchantment").is_dir());
    assert!(settings.epub_file("enchantment").is_file());
}

#[test]
fn test_build_uses_stylesheet_override() {
    let (_root, settings) = setup(SOURCE);
    fs::create_dir_all(&settings.resource_dir).unwrap();
    fs::write(settings.stylesheet_file(), "body { color: #222 }").unwrap();

    build_command("enchantment", &settings, PackageFormat::Dir).unwrap();
    let css = read(
        &settings
            .book_target_dir("enchantment")
            .join("OEBPS/Styles/stylesheet.css"),
    );
    assert_eq!(css, "body { color: #222 }");
}

#[test]
fn test_build_missing_source() {
    let (_root, settings) = setup(SOURCE);
    let err = build_command("unknown", &settings, PackageFormat::Dir).unwrap_err();
    assert!(err.to_string().contains("Source file not found"));
}

#[test]
fn test_build_missing_image() {
    let (_root, settings) = setup(SOURCE);
    fs::remove_file(settings.book_source_dir("enchantment").join("map.png")).unwrap();
    let err = build_command("enchantment", &settings, PackageFormat::Dir).unwrap_err();
    assert!(err.to_string().contains("Failed to read image"));
}

#[test]
fn test_build_reports_structural_error() {
    let broken = SOURCE.replace("<!--epilogue-->", "<!--preface-->");
    let (_root, settings) = setup(&broken);
    let err = build_command("enchantment", &settings, PackageFormat::Dir).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("error[E"), "{message}");
    assert!(message.contains("source.html"));
    assert!(!settings.book_target_dir("enchantment").exists());
}

#[test]
fn test_check_report() {
    let report = CheckReport::from_source(SOURCE, "source.html");
    assert!(!report.has_errors());
    assert_eq!(report.sections.len(), 6);
    assert_eq!(report.guides.len(), 4);

    let outline = report.outline();
    assert!(outline.starts_with("cover cover Cover Page\n"));
    assert!(outline.contains("section001 chapter Chapter One\n"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["sections"][3]["id"], "section001");
    assert_eq!(json["sections"][3]["kind"], "chapter");
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn test_check_command_reads_file() {
    let (_root, settings) = setup(SOURCE);
    let input = settings.source_file("enchantment");
    let report = check_command(&input, OutputFormat::Json).unwrap();
    assert_eq!(report.sections.len(), 6);

    let missing = settings.source_file("nothing");
    assert!(check_command(&missing, OutputFormat::Text).is_err());
}

#[test]
fn test_build_rejects_path_like_book_names() {
    let (_root, settings) = setup(SOURCE);
    // a source reachable through "." must not make the target tree removable
    fs::write(settings.source_dir.join("source.html"), SOURCE).unwrap();
    fs::create_dir_all(&settings.target_dir).unwrap();
    let keep = settings.target_dir.join("other.epub");
    fs::write(&keep, "keep").unwrap();

    for name in [".", "..", "enchantment/..", "../source"] {
        let err = build_command(name, &settings, PackageFormat::Both).unwrap_err();
        assert!(err.to_string().contains("Invalid book name"), "{name}: {err}");
    }
    assert_eq!(read(&keep), "keep");
}
