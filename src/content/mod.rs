//! Article body handling
//!
//! Publication bodies arrive as untrusted HTML fragments. They are parsed
//! into a small tree, every `<script>` element and comment is removed, presentation
//! classes are injected onto structural elements and links are forced to
//! open in a new tab without an opener. The styled tree can be serialized
//! back to HTML ([`style_content`]) or laid out as terminal lines
//! ([`render_html`]).

mod dom;
mod parser;
mod render;
mod serialize;
mod styler;
mod styles;

pub use dom::{Element, Fragment, Node};
pub use parser::{decode_entities, parse_fragment};
pub use render::{render_fragment, RenderedArticle};
pub use serialize::{escape_attr, escape_text, to_html};
pub use styler::{
    apply_presentation, strip_comments, strip_scripts, style_fragment, StyleRule, LINK_REL, LINK_TARGET,
    STYLE_RULES,
};

/// Sanitize and style a raw HTML fragment for display.
///
/// Pure and idempotent: styling already-styled output yields the same string.
pub fn style_content(raw_html: &str) -> String {
    to_html(&style_fragment(parse_fragment(raw_html)))
}

/// Sanitize, style and lay out a raw HTML fragment at the given width.
pub fn render_html(raw_html: &str, width: u16) -> RenderedArticle {
    render_fragment(&style_fragment(parse_fragment(raw_html)), width)
}
