//! Header metadata extraction
//!
//! The header region of the source document declares book attributes as
//! HTML meta tags:
//!
//! ```text
//! <meta name="title" content="The Hollow Hills">
//! ```
//!
//! Extraction is a single forward pass from `<head>` to `</head>`. Lines
//! that are not meta declarations, and meta tags without a `name`, are
//! ignored.

use std::sync::OnceLock;

use ep3gen_ast::Attributes;
use regex::Regex;

use crate::cursor::LineCursor;
use crate::error::{ParseError, Result};

/// Line opening the header region
pub const HEAD_OPEN: &str = "<head>";
/// Line closing the header region
pub const HEAD_CLOSE: &str = "</head>";

/// Read meta declarations until the header closes.
///
/// On entry the cursor rests on the `<head>` line; on exit it rests on
/// `</head>`.
pub fn extract_metadata(cursor: &mut LineCursor) -> Result<Attributes> {
    let mut attributes = Attributes::new();

    loop {
        let line = cursor.advance()?;
        if line == HEAD_CLOSE {
            break;
        }
        if !line.starts_with("<meta") {
            continue;
        }
        let line_no = cursor.line_number();
        if let Some((name, content)) = parse_meta_line(cursor.current(), line_no)? {
            attributes.set(name, content);
        }
    }

    tracing::debug!(count = attributes.len(), "header attributes extracted");
    Ok(attributes)
}

/// Parse one `<meta>` line into a name/content pair.
///
/// Returns `Ok(None)` for meta tags that declare no name (such as
/// `<meta charset="utf-8">`) or an empty one.
pub fn parse_meta_line(line: &str, line_no: usize) -> Result<Option<(String, String)>> {
    if !line.contains("name=") {
        return Ok(None);
    }

    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    static CONTENT_RE: OnceLock<Regex> = OnceLock::new();
    let name_re = NAME_RE.get_or_init(|| Regex::new(r#"\bname="([^"]*)""#).unwrap());
    let content_re = CONTENT_RE.get_or_init(|| Regex::new(r#"\bcontent="([^"]*)""#).unwrap());

    let malformed = || ParseError::MalformedMetadata {
        line: line_no,
        text: line.to_string(),
    };

    let name = name_re
        .captures(line)
        .map(|c| c[1].to_string())
        .ok_or_else(malformed)?;
    let content = content_re
        .captures(line)
        .map(|c| c[1].to_string())
        .ok_or_else(malformed)?;

    if name.is_empty() {
        return Ok(None);
    }
    Ok(Some((name, content)))
}
