//! Single-pass conversion driver and HTML emission.

use std::borrow::Cow;
use std::fmt::Write;

use crate::attrs::{AttrValue, ImageAttrs};
use crate::line::{LineCategory, classify};
use crate::state::{BlockState, ListKind};

/// Converter for the line-oriented document dialect.
///
/// One conversion call owns its state and output buffer, so a single
/// converter may be used from any number of threads concurrently.
///
/// # Example
///
/// ```
/// use webdoc_render::HtmlConverter;
///
/// let html = HtmlConverter::new().convert("1. x\n2. y");
/// assert_eq!(html, "<ol><li>x</li><li>y</li></ol>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlConverter {
    escape: bool,
    verbose: bool,
}

impl HtmlConverter {
    /// Create a converter with verbatim text insertion and tracing off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape HTML metacharacters in text and attribute values.
    ///
    /// Off by default: existing documents rely on verbatim insertion, so
    /// escaping is strictly opt-in rather than a silent behavior change.
    #[must_use]
    pub fn with_escaping(mut self) -> Self {
        self.escape = true;
        self
    }

    /// Emit per-line classification diagnostics through `tracing`.
    ///
    /// Only gates diagnostics; the produced HTML is identical either way.
    #[must_use]
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Convert a full document to an HTML fragment string.
    ///
    /// Never fails: malformed lines degrade to no output, and an empty
    /// document yields an empty string.
    #[must_use]
    pub fn convert(&self, document: &str) -> String {
        let mut state = BlockState::default();
        let mut out = String::with_capacity(document.len());
        for line in document.lines() {
            self.process_line(line.trim(), &mut state, &mut out);
        }
        finish(&mut state, &mut out);
        out
    }

    fn process_line(&self, line: &str, state: &mut BlockState, out: &mut String) {
        let category = classify(line);
        if self.verbose {
            tracing::debug!(?category, "classified line");
        }
        match category {
            LineCategory::Header { level, text } => {
                close_list(state, out);
                // Headers leave an open image group alone; only a plain-text
                // line (or end of input) terminates it.
                write!(out, "<h{level}>{}</h{level}>", self.text(text)).unwrap();
            }
            LineCategory::UnorderedItem(text) => {
                self.list_item(ListKind::Unordered, text, state, out);
            }
            LineCategory::OrderedItem(text) => {
                self.list_item(ListKind::Ordered, text, state, out);
            }
            LineCategory::ImageDirective(payload) => self.image(payload, state, out),
            LineCategory::Plain(text) => {
                close_list(state, out);
                if state.take_group() {
                    out.push_str("</div>");
                }
                write!(out, "<p>{}</p>", self.text(text)).unwrap();
            }
            LineCategory::Blank => close_list(state, out),
        }
    }

    fn list_item(&self, kind: ListKind, text: &str, state: &mut BlockState, out: &mut String) {
        let transition = state.enter_list(kind);
        if let Some(kind) = transition.close {
            out.push_str(kind.close_tag());
        }
        if let Some(kind) = transition.open {
            out.push_str(kind.open_tag());
        }
        write!(out, "<li>{}</li>", self.text(text)).unwrap();
    }

    fn image(&self, payload: &str, state: &mut BlockState, out: &mut String) {
        let attrs = ImageAttrs::parse(payload);
        let Some(src) = attrs.src() else {
            // No usable location: the line renders nothing and leaves the
            // surrounding list/group state untouched.
            if self.verbose {
                tracing::debug!(payload, "image directive without src dropped");
            }
            return;
        };

        close_list(state, out);

        if let Some(group) = attrs.get("group") {
            let transition = state.enter_group(group);
            if transition.close_previous {
                out.push_str("</div>");
            }
            if transition.open_new {
                out.push_str(r#"<div class="image-group">"#);
            }
        }

        let figure = attrs.get("figure").is_some_and(AttrValue::is_truthy);
        if figure {
            out.push_str("<figure>");
        }

        let alt = attrs
            .text("alt")
            .filter(|alt| !alt.is_empty())
            .unwrap_or("Embedded Image");
        write!(out, r#"<img src="{}" alt="{}""#, self.text(src), self.text(alt)).unwrap();
        for (key, value) in attrs.passthrough() {
            match value {
                AttrValue::Flag => write!(out, " {key}").unwrap(),
                AttrValue::Text(value) => {
                    write!(out, r#" {key}="{}""#, self.text(value)).unwrap();
                }
            }
        }
        out.push_str(" />");

        if figure {
            if let Some(caption) = attrs.text("caption").filter(|caption| !caption.is_empty()) {
                write!(out, "<figcaption>{}</figcaption>", self.text(caption)).unwrap();
            }
            out.push_str("</figure>");
        }
    }

    fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.escape {
            Cow::Owned(escape_html(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

fn close_list(state: &mut BlockState, out: &mut String) {
    if let Some(kind) = state.take_list() {
        out.push_str(kind.close_tag());
    }
}

/// Flush still-open blocks after the last line: list first, then group.
fn finish(state: &mut BlockState, out: &mut String) {
    close_list(state, out);
    if state.take_group() {
        out.push_str("</div>");
    }
}

/// Convert a document with default settings.
#[must_use]
pub fn convert_to_html(document: &str) -> String {
    HtmlConverter::new().convert(document)
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
