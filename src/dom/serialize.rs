//! HTML serialization of [`Dom`] subtrees.
//!
//! Output is HTML5 (not XHTML): void elements carry no end tag and no
//! self-closing slash, raw-text elements are written verbatim.

use std::fmt::Write;

use super::arena::{Dom, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize a node including its own tag.
pub fn outer_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, false, &mut out);
    out
}

/// Serialize only the children of a node.
pub fn inner_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    let raw = dom.is_tag(id, RAW_TEXT_ELEMENTS);
    for child in dom.children(id) {
        write_node(dom, child, raw, &mut out);
    }
    out
}

fn write_node(dom: &Dom, id: NodeId, raw_parent: bool, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, false, out);
            }
        }
        NodeData::Text(text) => {
            if raw_parent {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeData::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }
        NodeData::Doctype { name, .. } => {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }
        NodeData::Element { name, attrs } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                let _ = write!(
                    out,
                    " {}=\"{}\"",
                    attr.name.local.as_ref(),
                    escape_attr(&attr.value)
                );
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in dom.children(id) {
                write_node(dom, child, raw, out);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\u{a0}' => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\u{a0}' => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}
