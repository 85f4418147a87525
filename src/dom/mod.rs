//! Mutable HTML document tree.
//!
//! - [`arena`]: the arena DOM and its splice operations
//! - [`tree_sink`]: html5ever sink that parses into the arena
//! - [`serialize`]: HTML5 serialization of subtrees

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, Dom, Node, NodeData, NodeId, attr_name, html_name};
pub use serialize::{escape_attr, escape_text, inner_html, outer_html};
pub use tree_sink::{DomSink, NodeHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document or fragment into a [`Dom`].
///
/// Fragments are wrapped by the parser in implied `html`/`head`/`body`
/// elements, exactly as a browser would.
pub fn parse_html(html: &str) -> Dom {
    parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}
