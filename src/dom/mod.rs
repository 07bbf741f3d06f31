//! Headless HTML document model.
//!
//! html5ever parses markup into an arena tree ([`Dom`]), `selectors` matches
//! CSS selectors against it ([`Query`]), and the tree can be mutated and
//! serialized back to HTML.

mod selector;
mod sink;
mod tree;

pub use selector::{ElementRef, Query, TourSelectors};
pub use tree::{Attribute, ChildrenIter, Dom, Node, NodeData, NodeId, attr_name, html_name};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use sink::DomSink;

/// Parse a full HTML document.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse HTML bytes, detecting the encoding.
///
/// See [`crate::util::decode_text`] for the detection order.
pub fn parse_html_bytes(html: &[u8]) -> Dom {
    let hint = crate::util::extract_meta_charset(html);
    let text = crate::util::decode_text(html, hint.as_deref());
    parse_html(&text)
}

/// Parse a markup fragment as the content of `<body>` and return a detached
/// tree plus the node whose children are the fragment.
pub fn parse_fragment(html: &str) -> (Dom, NodeId) {
    let dom = parse_html(&format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>"));
    let body = dom.body().unwrap_or_else(|| dom.document());
    (dom, body)
}
