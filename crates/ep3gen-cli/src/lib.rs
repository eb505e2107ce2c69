//! ep3gen CLI - Command-line interface library
//!
//! This library provides the CLI functionality for ep3gen:
//! - Build: convert a book's annotated XHTML source into an EPUB3 package
//! - Check: report the section structure of a source without writing output
//!
//! # Binary Usage
//!
//! ```bash
//! # Build data/generated/merlin/ and data/generated/merlin.epub
//! ep3gen build merlin --package both
//!
//! # Check a source file and print a JSON report
//! ep3gen check data/source/merlin/source.html --format json
//! ```

pub mod app;
pub mod config;

// Re-export main entry point and types
pub use app::{build_command, check_command, run_cli};
pub use app::{BuildSummary, CheckReport, OutputFormat, PackageFormat};
pub use config::Settings;
