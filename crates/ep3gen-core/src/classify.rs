//! Directive classification

use ep3gen_ast::DirectiveKind;

/// Prefix shared by every directive marker line
pub const MARKER_PREFIX: &str = "<!--";

/// Whether a line has the shape of a directive marker
///
/// Section bodies end at the first such line, recognised or not.
pub fn is_marker(line: &str) -> bool {
    line.starts_with(MARKER_PREFIX)
}

/// Map a line to its directive kind, `None` if it is not a known marker
pub fn classify(line: &str) -> Option<DirectiveKind> {
    if !is_marker(line) {
        return None;
    }
    DirectiveKind::from_marker(line)
}
