//! Error types for structural parsing
//!
//! Every error is fatal to the conversion. Variants carry the 1-based line
//! number of the offending source line where one exists.

use ep3gen_ast::DirectiveKind;
use thiserror::Error;

/// Errors raised while converting a document
#[derive(Error, Debug)]
pub enum ParseError {
    /// The line stream ended while more lines were required
    #[error("unexpected end of input after line {line}")]
    UnexpectedEndOfInput { line: usize },

    /// A `<meta>` declaration lacks its name or content
    #[error("line {line}: invalid 'meta' HTML line: {text}")]
    MalformedMetadata { line: usize, text: String },

    /// The line after a directive is not an `<h1>`..`<h3>` heading
    #[error("line {line}: HTML line with one of the tags <h1>, <h2> or <h3> expected, found: {text}")]
    HeadingFormat { line: usize, text: String },

    /// `titlepage="custom"` but the title page directive does not follow
    #[error("line {line}: <!--titlepage--> directive expected, found: {found}")]
    TitlePageDirectiveExpected { line: usize, found: String },

    /// The copyright directive is missing
    #[error("line {line}: <!--copyright--> directive expected, found: {found}")]
    CopyrightDirectiveExpected { line: usize, found: String },

    /// An at-most-once directive occurred a second time
    #[error("line {line}: directive <!--{kind}--> already specified")]
    DuplicateDirective { line: usize, kind: DirectiveKind },

    /// The body contains neither parts nor chapters
    #[error("line {line}: at least one <!--chapter--> directive must be specified")]
    NoChapterSpecified { line: usize },

    /// A line that is not an acceptable directive where one is required
    #[error("line {line}: unknown directive: {text}")]
    UnknownDirective { line: usize, text: String },

    /// An image file whose extension is neither `png` nor `jpeg`
    #[error("image '{file}': only image files with extension 'png' or 'jpeg' are accepted")]
    UnsupportedImageExtension { file: String },

    /// A mandatory header attribute is absent
    #[error("attribute '{key}' required")]
    MissingAttribute { key: &'static str },

    /// A header attribute has an unacceptable value
    #[error("attribute '{key}' has invalid value '{value}', expected '{expected}'")]
    InvalidAttribute {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The rendering sink failed to accept a page
    #[error("failed to render {id}: {source}")]
    Render {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ParseError {
    /// Source line associated with the error, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEndOfInput { line }
            | ParseError::MalformedMetadata { line, .. }
            | ParseError::HeadingFormat { line, .. }
            | ParseError::TitlePageDirectiveExpected { line, .. }
            | ParseError::CopyrightDirectiveExpected { line, .. }
            | ParseError::DuplicateDirective { line, .. }
            | ParseError::NoChapterSpecified { line }
            | ParseError::UnknownDirective { line, .. } => Some(*line),
            ParseError::UnsupportedImageExtension { .. }
            | ParseError::MissingAttribute { .. }
            | ParseError::InvalidAttribute { .. }
            | ParseError::Render { .. } => None,
        }
    }

    /// Stable diagnostic code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedEndOfInput { .. } => "E0001",
            ParseError::MalformedMetadata { .. } => "E0002",
            ParseError::HeadingFormat { .. } => "E0003",
            ParseError::TitlePageDirectiveExpected { .. } => "E0004",
            ParseError::CopyrightDirectiveExpected { .. } => "E0005",
            ParseError::DuplicateDirective { .. } => "E0006",
            ParseError::NoChapterSpecified { .. } => "E0007",
            ParseError::UnknownDirective { .. } => "E0008",
            ParseError::UnsupportedImageExtension { .. } => "E0009",
            ParseError::MissingAttribute { .. } => "E0010",
            ParseError::InvalidAttribute { .. } => "E0011",
            ParseError::Render { .. } => "E0012",
        }
    }
}

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_directive() {
        let err = ParseError::DuplicateDirective {
            line: 12,
            kind: DirectiveKind::Bibliography,
        };
        assert_eq!(
            err.to_string(),
            "line 12: directive <!--bibliography--> already specified"
        );
        assert_eq!(err.line(), Some(12));
    }

    #[test]
    fn test_attribute_errors_have_no_line() {
        let err = ParseError::MissingAttribute { key: "title" };
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "attribute 'title' required");
    }
}
