//! Helpers shared by the rebuild passes.

use crate::dom::{Dom, NodeId};
use crate::marker::marker_kind;

/// Create a `<p>` and move every child of `source` into it.
pub fn paragraph_from(dom: &mut Dom, source: NodeId) -> NodeId {
    let p = dom.element("p", &[]);
    dom.move_children(source, p);
    p
}

/// Create `<tag>` holding `text`.
pub fn text_element(dom: &mut Dom, tag: &str, attrs: &[(&str, &str)], text: &str) -> NodeId {
    let el = dom.element(tag, attrs);
    dom.append_text(el, text);
    el
}

/// First later sibling of `from` satisfying `pred`, following live links.
pub fn next_sibling_where<F>(dom: &Dom, from: NodeId, pred: F) -> Option<NodeId>
where
    F: Fn(&Dom, NodeId) -> bool,
{
    let mut cursor = dom.get(from).map(|n| n.next_sibling)?;
    while cursor.is_some() {
        if pred(dom, cursor) {
            return Some(cursor);
        }
        cursor = dom.get(cursor).map(|n| n.next_sibling)?;
    }
    None
}

/// Whether `id` is still attached somewhere below `root`.
pub fn is_inside(dom: &Dom, id: NodeId, root: NodeId) -> bool {
    let mut cursor = dom.parent(id);
    while let Some(parent) = cursor {
        if parent == root {
            return true;
        }
        cursor = dom.parent(parent);
    }
    false
}

/// Remove every marker left anywhere under `root`.
///
/// The family passes only look at the container's direct children; markers
/// nested inside other content are caught here.
pub fn sweep_all(dom: &mut Dom, root: NodeId) -> usize {
    let mut swept = 0;
    for child in dom.child_vec(root) {
        if marker_kind(dom, child).is_some() {
            dom.detach(child);
            swept += 1;
        } else {
            swept += sweep_all(dom, child);
        }
    }
    swept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MARKER_ATTR;

    #[test]
    fn test_paragraph_from_moves_children() {
        let mut dom = Dom::new();
        let marker = dom.element("p", &[(MARKER_ATTR, "details-content")]);
        dom.append_text(marker, "body");

        let p = paragraph_from(&mut dom, marker);

        assert_eq!(dom.text_content(p), "body");
        assert!(dom.child_vec(marker).is_empty());
        assert_eq!(dom.get_attr(p, MARKER_ATTR), None);
    }

    #[test]
    fn test_sweep_all_reaches_nested_markers() {
        let mut dom = Dom::new();
        let main = dom.element("main", &[]);
        let section = dom.element("section", &[]);
        dom.append(main, section);
        let nested = dom.element("p", &[(MARKER_ATTR, "table-hover")]);
        dom.append(section, nested);
        let keep = dom.element("p", &[(MARKER_ATTR, "not-a-marker")]);
        dom.append(section, keep);

        assert_eq!(sweep_all(&mut dom, main), 1);
        assert_eq!(dom.child_vec(section), vec![keep]);
    }

    #[test]
    fn test_next_sibling_where_skips_non_matching() {
        let mut dom = Dom::new();
        let main = dom.element("main", &[]);
        let marker = dom.element("p", &[]);
        let other = dom.element("p", &[]);
        let table = dom.element("table", &[]);
        for id in [marker, other, table] {
            dom.append(main, id);
        }

        let found = next_sibling_where(&dom, marker, |d, n| d.is_tag(n, &["table"]));
        assert_eq!(found, Some(table));
        assert_eq!(next_sibling_where(&dom, table, |_, _| true), None);
    }
}
