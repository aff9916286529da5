//! Converter for the plain-text dialect exported by remote document sources.
//!
//! The dialect is deliberately narrow and line-local: headers, flat
//! unordered/ordered lists, paragraphs, and a bracketed image directive with
//! arbitrary key/value attributes. It is not Markdown and must not be
//! extended toward it — fidelity to existing documents wins over generality.
//!
//! Conversion is a single left-to-right pass over trimmed lines. Each line is
//! classified ([`line::classify`]), image directives get their payload parsed
//! into an attribute bag ([`ImageAttrs`]), and a small block state machine
//! ([`BlockState`]) decides which list/group wrappers to open or close before
//! the line's own markup is appended to the output.
//!
//! The engine never fails: malformed directives degrade to "nothing emitted
//! for this line". It performs no I/O, holds no process-wide state, and is
//! freely reentrant across threads.
//!
//! # Example
//!
//! ```
//! let html = webdoc_render::convert_to_html("# Title\n* a\n* b");
//! assert_eq!(html, "<h1>Title</h1><ul><li>a</li><li>b</li></ul>");
//! ```

mod attrs;
mod convert;
pub mod line;
mod state;

pub use attrs::{AttrValue, ImageAttrs};
pub use convert::{HtmlConverter, convert_to_html, escape_html};
pub use line::LineCategory;
pub use state::{BlockState, GroupTransition, ListKind, ListTransition};
