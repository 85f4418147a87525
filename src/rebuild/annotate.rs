//! Passes 2 and 6: Table and list annotation
//!
//! Table and list markers are not self-contained: each one styles the next
//! eligible sibling after it. The marker is always removed, whether or not a
//! target turned up.

use crate::dom::{Dom, NodeId};
use crate::marker::{MarkerFamily, MarkerKind, marker_in};

use super::RebuildReport;
use super::scan::next_sibling_where;

const RESPONSIVE_CLASS: &str = "table-responsive";
const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Bootstrap classes for a table marker. `None` for `table-responsive`,
/// which wraps instead of restyling.
pub fn table_classes(kind: MarkerKind) -> Option<&'static str> {
    match kind {
        MarkerKind::TableBasic => Some("table"),
        MarkerKind::TableStriped => Some("table table-striped"),
        MarkerKind::TableBordered => Some("table table-bordered"),
        MarkerKind::TableHover => Some("table table-hover"),
        MarkerKind::TableCondensed => Some("table table-condensed"),
        _ => None,
    }
}

/// Apply every table marker to the first table after it.
///
/// `table-responsive` wraps the table in `div.table-responsive`; the other
/// kinds replace the table's class attribute. A responsive wrapper counts as
/// its table, so marker order does not matter and a table is wrapped at most
/// once.
pub fn annotate_tables(dom: &mut Dom, container: NodeId, report: &mut RebuildReport) {
    for marker in dom.child_vec(container) {
        let Some(kind) = marker_in(dom, marker, MarkerFamily::Table) else {
            continue;
        };

        if let Some(table) = find_table(dom, marker) {
            match table_classes(kind) {
                Some(classes) => dom.set_attr(table, "class", classes),
                None => wrap_responsive(dom, table),
            }
            report.tables += 1;
        } else {
            log::debug!("{kind} marker has no table after it");
        }
        dom.detach(marker);
    }
}

/// Add the marker kind as a class on the first list after each list marker.
pub fn annotate_lists(dom: &mut Dom, container: NodeId, report: &mut RebuildReport) {
    for marker in dom.child_vec(container) {
        let Some(kind) = marker_in(dom, marker, MarkerFamily::List) else {
            continue;
        };

        if let Some(list) = next_sibling_where(dom, marker, |d, n| d.is_tag(n, LIST_TAGS)) {
            dom.add_class(list, kind.as_str());
            report.lists += 1;
        } else {
            log::debug!("{kind} marker has no list after it");
        }
        dom.detach(marker);
    }
}

fn is_responsive_wrapper(dom: &Dom, id: NodeId) -> bool {
    dom.is_tag(id, &["div"]) && dom.has_class(id, RESPONSIVE_CLASS)
}

fn find_table(dom: &Dom, marker: NodeId) -> Option<NodeId> {
    let target = next_sibling_where(dom, marker, |d, n| {
        d.is_tag(n, &["table"]) || is_responsive_wrapper(d, n)
    })?;
    if dom.is_tag(target, &["table"]) {
        return Some(target);
    }
    dom.children(target).find(|&c| dom.is_tag(c, &["table"]))
}

fn wrap_responsive(dom: &mut Dom, table: NodeId) {
    if dom.parent(table).is_some_and(|p| is_responsive_wrapper(dom, p)) {
        return;
    }
    let wrapper = dom.element("div", &[("class", RESPONSIVE_CLASS)]);
    dom.insert_before(table, wrapper);
    dom.append(wrapper, table);
}
