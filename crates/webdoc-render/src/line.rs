//! Line classification.
//!
//! Every trimmed line belongs to exactly one category. The checks run in a
//! fixed order and the first match wins — the patterns are not mutually
//! exclusive (`# x` would otherwise also read as plain text), so the order
//! is part of the dialect.

/// Category of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCategory<'a> {
    /// `#`–`######` followed by whitespace.
    Header {
        /// Heading level (1-6).
        level: u8,
        /// Heading text with the marker stripped.
        text: &'a str,
    },
    /// Line starting with `*`.
    UnorderedItem(&'a str),
    /// Line starting with digits followed by `.`.
    OrderedItem(&'a str),
    /// Whole line of the form `[image|<payload>]`; carries the raw payload.
    ImageDirective(&'a str),
    /// Any other non-empty line.
    Plain(&'a str),
    /// Empty line.
    Blank,
}

/// Classify a trimmed line.
///
/// Total and pure: every input maps to exactly one category with no lookback
/// at other lines. A line whose bracket syntax matches the image directive
/// owns the line even if its payload later turns out to be malformed — there
/// is no fallback to [`LineCategory::Plain`].
pub fn classify(line: &str) -> LineCategory<'_> {
    if let Some((level, text)) = parse_header(line) {
        return LineCategory::Header { level, text };
    }
    if let Some(rest) = line.strip_prefix('*') {
        return LineCategory::UnorderedItem(rest.trim());
    }
    if let Some(text) = parse_ordered_item(line) {
        return LineCategory::OrderedItem(text);
    }
    if let Some(payload) = parse_directive_payload(line) {
        return LineCategory::ImageDirective(payload);
    }
    if line.is_empty() {
        return LineCategory::Blank;
    }
    LineCategory::Plain(line)
}

/// Parse a header marker: 1-6 `#` characters followed by whitespace.
///
/// Returns `(level, trimmed text)`. Seven or more hashes, or a hash run with
/// no whitespace after it, is not a header.
fn parse_header(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

/// Parse an ordered item marker: one or more digits followed by `.`.
///
/// Returns the trimmed text after the first `digits.` prefix.
fn parse_ordered_item(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.').map(str::trim)
}

/// Literal prefix of an image directive line.
const DIRECTIVE_OPEN: &str = "[image|";

/// Extract the payload of an image directive line.
///
/// The entire line must be wrapped: `[image|<payload>]`.
fn parse_directive_payload(line: &str) -> Option<&str> {
    line.strip_prefix(DIRECTIVE_OPEN)?.strip_suffix(']')
}
