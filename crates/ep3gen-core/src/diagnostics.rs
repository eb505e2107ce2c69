//! Conversion diagnostics
//!
//! Structured, serialisable reports for the `check` command. Errors come
//! from a failed parse; warnings come from inspecting a successful one.

use ep3gen_ast::Book;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A diagnostic message about a source document
///
/// # Example
///
/// ```
/// use ep3gen_core::diagnostics::{Diagnostic, Severity};
///
/// let diag = Diagnostic::error("directive <!--preface--> already specified")
///     .with_code("E0006")
///     .with_line(42);
/// assert_eq!(diag.severity, Severity::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,

    pub message: String,

    /// Stable code such as "E0006"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// 1-based source line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            line: None,
            file: None,
            help: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        let mut diag = Diagnostic::error(err.to_string()).with_code(err.code());
        if let Some(line) = err.line() {
            diag = diag.with_line(line);
        }
        if let Some(help) = help_for(err) {
            diag = diag.with_help(help);
        }
        diag
    }
}

fn help_for(err: &ParseError) -> Option<&'static str> {
    match err {
        ParseError::HeadingFormat { .. } => {
            Some("use <h1>&#160;</h1> when the section has no heading")
        }
        ParseError::TitlePageDirectiveExpected { .. } => {
            Some("titlepage=\"custom\" requires <!--titlepage--> as the first directive")
        }
        ParseError::NoChapterSpecified { .. } => {
            Some("add at least one <!--part--> or <!--chapter--> after the front matter")
        }
        ParseError::UnknownDirective { .. } => {
            Some("only afterword, epilogue, appendix and end may follow the chapters")
        }
        ParseError::UnsupportedImageExtension { .. } => {
            Some("rename JPEG files to use the .jpeg extension")
        }
        ParseError::UnexpectedEndOfInput { .. } => {
            Some("terminate the body with <!--end-->")
        }
        _ => None,
    }
}

/// Warnings for a successfully parsed book
///
/// Parts and chapters without a heading are shown in navigation under
/// their generic label, which is rarely intended.
pub fn lint_book(book: &Book) -> Vec<Diagnostic> {
    book.sections
        .iter()
        .filter(|s| s.kind.is_body() && s.heading.is_empty())
        .map(|s| {
            Diagnostic::warning(format!(
                "{} {} has no heading, navigation shows '{}'",
                s.kind,
                s.id,
                s.display_heading()
            ))
            .with_code("W0001")
        })
        .collect()
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: severity[code]: message
        write!(f, "{}", self.severity)?;
        if let Some(ref code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;

        if let Some(ref file) = self.file {
            write!(f, "\n  --> {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }

        if let Some(ref help) = self.help {
            write!(f, "\n  = help: {}", help)?;
        }

        Ok(())
    }
}
