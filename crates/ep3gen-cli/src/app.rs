//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ep3gen_ast::{Book, Section};
use ep3gen_core::{lint_book, partition, Body, Diagnostic, NullSink, Parser as SourceParser};
use ep3gen_epub::{EpubPackage, EpubWriter};

use crate::config::Settings;

/// Output format for the check command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable outline
    #[default]
    Text,
    /// JSON report for tool consumption
    Json,
}

/// Which outputs the build command writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PackageFormat {
    /// Expanded directory tree only
    #[default]
    Dir,
    /// Zipped `.epub` only
    Epub,
    /// Both the directory tree and the `.epub`
    Both,
}

impl PackageFormat {
    fn writes_dir(self) -> bool {
        matches!(self, PackageFormat::Dir | PackageFormat::Both)
    }

    fn writes_epub(self) -> bool {
        matches!(self, PackageFormat::Epub | PackageFormat::Both)
    }
}

#[derive(Parser)]
#[command(name = "ep3gen")]
#[command(author, version, about = "Generate EPUB3 books from annotated XHTML", long_about = None)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every section and state transition
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert `<source_dir>/<BOOK>/source.html` into an EPUB3 book
    Build {
        /// Book name, a subdirectory of the source directory
        book: String,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output to write
        #[arg(short, long, value_enum, default_value = "dir")]
        package: PackageFormat,
    },

    /// Check the directive structure of a source file without writing output
    Check {
        /// Input source file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Build {
            book,
            config,
            package,
        } => {
            let settings = Settings::load(config.as_deref())?;
            let summary = build_command(&book, &settings, package)?;
            for path in &summary.outputs {
                println!("Generated {}", path.display());
            }
            println!("{} lines processed", summary.line_count);
        }
        Commands::Check { input, format } => {
            let report = check_command(&input, format)?;
            if report.has_errors() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Initialise logging on stderr. `RUST_LOG` takes precedence over the flags.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        tracing::Level::WARN
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Number of source lines read
    pub line_count: usize,
    /// Number of sections generated
    pub section_count: usize,
    /// Directory tree and/or `.epub` file written
    pub outputs: Vec<PathBuf>,
}

/// Execute the build command
pub fn build_command(book: &str, settings: &Settings, format: PackageFormat) -> Result<BuildSummary> {
    validate_book_name(book)?;
    let source_file = settings.source_file(book);
    if !source_file.is_file() {
        anyhow::bail!("Source file not found: {}", source_file.display());
    }
    let text = fs::read_to_string(&source_file)
        .with_context(|| format!("Failed to read source file: {}", source_file.display()))?;

    tracing::info!(book, source = %source_file.display(), "converting");
    let mut writer = EpubWriter::new();
    let parsed = SourceParser::from_text(&text).parse(&mut writer);
    let book_data = match parsed {
        Ok(book_data) => book_data,
        Err(err) => {
            let diagnostic = Diagnostic::from(&err).with_file(source_file.display().to_string());
            anyhow::bail!("{diagnostic}");
        }
    };
    for warning in lint_book(&book_data) {
        tracing::warn!("{}", warning.with_file(source_file.display().to_string()));
    }

    let package = assemble(writer, &book_data, &settings.book_source_dir(book), settings)?;
    package
        .check_xml()
        .context("Generated package is not well-formed XML")?;

    let mut outputs = Vec::new();
    if format.writes_dir() {
        let target = settings.book_target_dir(book);
        if target.exists() {
            fs::remove_dir_all(&target).with_context(|| {
                format!("Failed to remove previous output: {}", target.display())
            })?;
        }
        package
            .write_to_dir(&target)
            .with_context(|| format!("Failed to write output tree: {}", target.display()))?;
        outputs.push(target);
    }
    if format.writes_epub() {
        fs::create_dir_all(&settings.target_dir).with_context(|| {
            format!("Failed to create target directory: {}", settings.target_dir.display())
        })?;
        let epub = settings.epub_file(book);
        package
            .write_to_file(&epub)
            .with_context(|| format!("Failed to write EPUB file: {}", epub.display()))?;
        outputs.push(epub);
    }

    Ok(BuildSummary {
        line_count: book_data.line_count,
        section_count: book_data.sections.len(),
        outputs,
    })
}

/// A book name must be a single plain directory name. The output tree
/// `<target_dir>/<book>` is removed before writing.
fn validate_book_name(book: &str) -> Result<()> {
    let mut components = Path::new(book).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == book => Ok(()),
        _ => anyhow::bail!("Invalid book name: {book:?} (expected a single directory name)"),
    }
}

/// Supply the stylesheet and images, then finish the package
fn assemble(
    mut writer: EpubWriter,
    book: &Book,
    image_dir: &Path,
    settings: &Settings,
) -> Result<EpubPackage> {
    let stylesheet = settings.stylesheet_file();
    if stylesheet.is_file() {
        let css = fs::read_to_string(&stylesheet)
            .with_context(|| format!("Failed to read stylesheet: {}", stylesheet.display()))?;
        writer.set_stylesheet(css);
    } else {
        tracing::warn!(
            path = %stylesheet.display(),
            "stylesheet not found, using built-in stylesheet"
        );
    }

    for image in std::iter::once(&book.cover_image).chain(book.images.iter()) {
        let path = image_dir.join(&image.file_name);
        let data = fs::read(&path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        writer.add_image(image.file_name.clone(), data);
    }

    writer.finish(book).context("Failed to assemble EPUB package")
}

/// Structure report produced by the check command
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub sections: Vec<Section>,
    pub guides: Vec<Section>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Parse `text` and collect its structure and diagnostics
    pub fn from_source(text: &str, file: &str) -> Self {
        match SourceParser::from_text(text).parse(&mut NullSink) {
            Ok(book) => Self {
                diagnostics: lint_book(&book)
                    .into_iter()
                    .map(|d| d.with_file(file))
                    .collect(),
                sections: book.sections,
                guides: book.guides,
            },
            Err(err) => Self {
                diagnostics: vec![Diagnostic::from(&err).with_file(file)],
                ..Self::default()
            },
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Indented table of contents
    pub fn outline(&self) -> String {
        let toc = partition(&self.sections);
        let mut out = String::new();
        let mut line = |section: &Section, depth: usize| {
            out.push_str(&format!(
                "{}{} {} {}\n",
                "  ".repeat(depth),
                section.id,
                section.kind,
                section.display_heading()
            ));
        };
        for section in toc.front {
            line(section, 0);
        }
        match &toc.body {
            Body::Chapters(chapters) => {
                for chapter in *chapters {
                    line(chapter, 0);
                }
            }
            Body::Parts(groups) => {
                for group in groups {
                    line(group.part, 0);
                    for chapter in group.chapters {
                        line(chapter, 1);
                    }
                }
            }
        }
        for section in toc.back {
            line(section, 0);
        }
        out
    }
}

/// Execute the check command
pub fn check_command(input: &Path, format: OutputFormat) -> Result<CheckReport> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let report = CheckReport::from_source(&content, &input.display().to_string());

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize check report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print!("{}", report.outline());
            for diag in &report.diagnostics {
                println!("{}", diag);
                println!();
            }
            if report.diagnostics.is_empty() {
                println!("✓ No issues found in {}", input.display());
            } else {
                let error_count = report.diagnostics.iter().filter(|d| d.is_error()).count();
                println!(
                    "Found {} error(s) and {} warning(s)",
                    error_count,
                    report.diagnostics.len() - error_count
                );
            }
        }
    }

    Ok(report)
}
