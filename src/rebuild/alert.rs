//! Pass 1: Alerts

use crate::dom::{Dom, NodeId};
use crate::marker::{MarkerFamily, marker_in};

use super::RebuildReport;
use super::scan::is_inside;

/// Replace every alert marker with `<section class="alert alert-<kind>">`.
///
/// Before: `div[data-wet=alert-warning] > p`
/// After:  `section.alert.alert-warning > p`
///
/// The marker's first element descendant (normally the paragraph) becomes
/// the section's only child. A marker with no element inside still yields an
/// empty section.
pub fn wrap_alerts(dom: &mut Dom, container: NodeId, report: &mut RebuildReport) {
    let markers: Vec<_> = dom
        .descendants(container)
        .into_iter()
        .filter_map(|id| marker_in(dom, id, MarkerFamily::Alert).map(|kind| (id, kind)))
        .collect();

    for (marker, kind) in markers {
        // An earlier alert may have dropped this one along with its parent.
        if !is_inside(dom, marker, container) {
            continue;
        }

        let class = format!("alert {kind}");
        let section = dom.element("section", &[("class", class.as_str())]);
        if let Some(content) = dom.first_element_descendant(marker) {
            dom.append(section, content);
        }
        dom.insert_before(marker, section);
        dom.detach(marker);
        report.alerts += 1;
    }
}
