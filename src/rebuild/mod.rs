//! Marker reconstruction.
//!
//! The converter leaves a flat run of siblings in which some paragraphs are
//! marker placeholders (see [`crate::marker`]). These passes fold each marker
//! family into real GCWeb structure and remove the markers.
//!
//! ## Pipeline Order
//!
//! 1. **Alerts** - `section.alert.alert-*` around the marker's paragraph
//! 2. **Tables** - restyle or wrap the next table
//! 3. **Details** - summary + content markers into `<details>`
//! 4. **Accordion** - start/heading/panel/end scopes into `section.wb-accordion`
//! 5. **Pagination** - start/item/end scopes into `nav > ul.pagination`
//! 6. **Lists** - add the marker's class to the next list
//!
//! Each pass consumes its whole family before the next runs and only looks
//! at the container's current children. A final sweep removes markers that
//! ended up nested where no pass could reach them.

mod accordion;
mod alert;
mod annotate;
mod details;
mod pagination;
mod policy;
mod scan;

pub use accordion::build_accordions;
pub use alert::wrap_alerts;
pub use annotate::{annotate_lists, annotate_tables, table_classes};
pub use details::build_details;
pub use pagination::build_pagination;
pub use policy::{Policy, StrayContent};

use crate::dom::{Dom, NodeId};

/// What the passes built and removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildReport {
    pub alerts: usize,
    pub tables: usize,
    pub lists: usize,
    pub details: usize,
    pub accordions: usize,
    pub accordion_items: usize,
    pub paginations: usize,
    /// Markers removed without producing anything.
    pub swept: usize,
}

/// Run every pass over the children of `container`.
pub fn rebuild(dom: &mut Dom, container: NodeId, policy: &Policy) -> RebuildReport {
    let mut report = RebuildReport::default();

    wrap_alerts(dom, container, &mut report);
    annotate_tables(dom, container, &mut report);
    build_details(dom, container, policy, &mut report);
    build_accordions(dom, container, policy, &mut report);
    build_pagination(dom, container, &mut report);
    annotate_lists(dom, container, &mut report);

    report.swept += scan::sweep_all(dom, container);

    log::debug!("rebuild: {report:?}");
    report
}
