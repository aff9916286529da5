//! Image directive attribute parsing.
//!
//! Parses the `src:<url>|key="value"|flag` payload of an image directive.
//!
//! The payload is a `|`-delimited token list. The first token is the
//! location (`src:<url>`); every later token is either `key="value"` (string
//! value, exact quoted content, embedded quotes are not escaped) or a bare
//! `key` (boolean flag). Keys are case-sensitive and restricted to word
//! characters. Tokens matching neither form are ignored and duplicate keys
//! are resolved last-wins — the parser is lenient and never fails.

use std::collections::HashMap;

/// Value of a single directive attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Bare `key` token with no value.
    Flag,
    /// `key="value"` token.
    Text(String),
}

impl AttrValue {
    /// Whether the value counts as set: flags always do, strings when
    /// non-empty.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag => true,
            Self::Text(text) => !text.is_empty(),
        }
    }

    /// The string value, if this attribute has one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Keys consumed by the emitter rather than passed through to the `<img>` tag.
const SEMANTIC_KEYS: [&str; 5] = ["src", "alt", "group", "figure", "caption"];

/// Parsed attribute bag of one image directive.
///
/// # Example
///
/// ```
/// use webdoc_render::ImageAttrs;
///
/// let attrs = ImageAttrs::parse(r#"src:http://x/y.png|alt="Cat"|lazy"#);
/// assert_eq!(attrs.src(), Some("http://x/y.png"));
/// assert_eq!(attrs.text("alt"), Some("Cat"));
/// assert!(attrs.get("lazy").is_some());
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImageAttrs {
    attrs: HashMap<String, AttrValue>,
}

impl ImageAttrs {
    /// Parse a directive payload into an attribute bag.
    ///
    /// Never fails; a malformed or empty payload yields a bag without `src`,
    /// which suppresses rendering for the line.
    #[must_use]
    pub fn parse(payload: &str) -> Self {
        let mut attrs = HashMap::new();
        let mut tokens = payload.split('|');

        // The leading token is the location slot. Anything else in that
        // position is dropped.
        if let Some(first) = tokens.next()
            && let Some(value) = first.trim().strip_prefix("src:")
        {
            attrs.insert("src".to_owned(), AttrValue::Text(value.trim().to_owned()));
        }

        for token in tokens {
            if let Some((key, value)) = parse_attr_token(token.trim()) {
                attrs.insert(key, value);
            }
        }

        Self { attrs }
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Get an attribute's string value by key (flags yield `None`).
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_text)
    }

    /// The image location, if present and non-empty.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        self.text("src").filter(|src| !src.is_empty())
    }

    /// Attributes passed through verbatim to the `<img>` tag.
    ///
    /// Excludes the semantic keys; sorted by key so output is deterministic.
    #[must_use]
    pub fn passthrough(&self) -> Vec<(&str, &AttrValue)> {
        let mut extra: Vec<_> = self
            .attrs
            .iter()
            .filter(|(key, _)| !SEMANTIC_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        extra.sort_unstable_by_key(|&(key, _)| key);
        extra
    }
}

/// Parse one attribute token: `key="value"` or bare `key`.
///
/// Keys are word characters only. Returns `None` for anything else, including
/// unquoted `key=value` forms.
fn parse_attr_token(token: &str) -> Option<(String, AttrValue)> {
    let key_end = token
        .find(|c: char| !is_word_char(c))
        .unwrap_or(token.len());
    if key_end == 0 {
        return None;
    }
    let key = &token[..key_end];
    let rest = &token[key_end..];

    if rest.is_empty() {
        return Some((key.to_owned(), AttrValue::Flag));
    }

    // Quoted value: everything between the opening quote and the token's
    // final quote, embedded quotes kept as-is.
    let value = rest.strip_prefix("=\"")?.strip_suffix('"')?;
    Some((key.to_owned(), AttrValue::Text(value.to_owned())))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_src_only() {
        let attrs = ImageAttrs::parse("src:http://x/y.png");
        assert_eq!(attrs.src(), Some("http://x/y.png"));
        assert!(attrs.passthrough().is_empty());
    }

    #[test]
    fn test_src_value_trimmed() {
        let attrs = ImageAttrs::parse("src: a.png ");
        assert_eq!(attrs.src(), Some("a.png"));
    }

    #[test]
    fn test_empty_src_suppresses() {
        let attrs = ImageAttrs::parse("src:");
        assert_eq!(attrs.src(), None);
    }

    #[test]
    fn test_empty_payload() {
        let attrs = ImageAttrs::parse("");
        assert_eq!(attrs.src(), None);
    }

    #[test]
    fn test_first_token_without_src_prefix_ignored() {
        let attrs = ImageAttrs::parse(r#"alt="x""#);
        assert_eq!(attrs.src(), None);
        assert_eq!(attrs.get("alt"), None);
    }

    #[test]
    fn test_quoted_attribute() {
        let attrs = ImageAttrs::parse(r#"src:a.png|alt="Cat photo""#);
        assert_eq!(attrs.text("alt"), Some("Cat photo"));
    }

    #[test]
    fn test_flag_attribute() {
        let attrs = ImageAttrs::parse("src:a.png|figure");
        assert_eq!(attrs.get("figure"), Some(&AttrValue::Flag));
        assert!(attrs.get("figure").unwrap().is_truthy());
    }

    #[test]
    fn test_empty_quoted_value_not_truthy() {
        let attrs = ImageAttrs::parse(r#"src:a.png|figure="""#);
        assert!(!attrs.get("figure").unwrap().is_truthy());
    }

    #[test]
    fn test_embedded_quote_kept() {
        let attrs = ImageAttrs::parse(r#"src:a.png|alt="a "quoted" word""#);
        assert_eq!(attrs.text("alt"), Some(r#"a "quoted" word"#));
    }

    #[test]
    fn test_unquoted_value_ignored() {
        let attrs = ImageAttrs::parse("src:a.png|width=560");
        assert_eq!(attrs.get("width"), None);
    }

    #[test]
    fn test_unterminated_quote_ignored() {
        let attrs = ImageAttrs::parse(r#"src:a.png|alt="oops"#);
        assert_eq!(attrs.get("alt"), None);
    }

    #[test]
    fn test_non_word_key_ignored() {
        let attrs = ImageAttrs::parse(r#"src:a.png|data-x="1"|=""#);
        assert_eq!(attrs.get("data-x"), None);
        assert_eq!(attrs.get("data"), None);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let attrs = ImageAttrs::parse(r#"src:a.png|alt="first"|alt="second""#);
        assert_eq!(attrs.text("alt"), Some("second"));
    }

    #[test]
    fn test_later_src_colon_token_ignored() {
        let attrs = ImageAttrs::parse("src:a.png|src:b.png");
        assert_eq!(attrs.src(), Some("a.png"));
    }

    #[test]
    fn test_later_quoted_src_overrides() {
        let attrs = ImageAttrs::parse(r#"src:a.png|src="b.png""#);
        assert_eq!(attrs.src(), Some("b.png"));
    }

    #[test]
    fn test_tokens_trimmed() {
        let attrs = ImageAttrs::parse(r#"src:a.png| alt="Cat" | figure "#);
        assert_eq!(attrs.text("alt"), Some("Cat"));
        assert_eq!(attrs.get("figure"), Some(&AttrValue::Flag));
    }

    #[test]
    fn test_passthrough_sorted_and_filtered() {
        let attrs =
            ImageAttrs::parse(r#"src:a.png|zeta="1"|alpha="2"|group="g"|caption="c"|lazy"#);
        let extra = attrs.passthrough();
        assert_eq!(extra.len(), 3);
        assert_eq!(extra[0].0, "alpha");
        assert_eq!(extra[1].0, "lazy");
        assert_eq!(extra[2].0, "zeta");
    }

    #[test]
    fn test_key_case_sensitive() {
        let attrs = ImageAttrs::parse(r#"src:a.png|Alt="X""#);
        assert_eq!(attrs.text("alt"), None);
        assert_eq!(attrs.text("Alt"), Some("X"));
    }
}
