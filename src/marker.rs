//! Marker vocabulary.
//!
//! The converter replaces each recognised Word paragraph style with a
//! placeholder element carrying `data-wet="<kind>"`. The rebuild passes
//! consume those placeholders; none survive into the output.

use std::fmt;

use crate::dom::{Dom, NodeId};

/// Attribute that carries the marker kind.
pub const MARKER_ATTR: &str = "data-wet";

/// Marker families. Each rebuild pass owns exactly one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerFamily {
    Alert,
    Table,
    List,
    Details,
    Accordion,
    Pagination,
}

/// Every marker kind the converter can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    AlertSuccess,
    AlertInfo,
    AlertWarning,
    AlertDanger,

    TableBasic,
    TableStriped,
    TableBordered,
    TableHover,
    TableCondensed,
    TableResponsive,

    ListInline,
    ListUnstyled,

    DetailsSummary,
    DetailsContent,

    AccordionStart,
    AccordionHeading,
    AccordionPanel,
    AccordionEnd,

    PaginationStart,
    PaginationItem,
    PaginationActive,
    PaginationDisabled,
    PaginationEnd,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 23] = [
        MarkerKind::AlertSuccess,
        MarkerKind::AlertInfo,
        MarkerKind::AlertWarning,
        MarkerKind::AlertDanger,
        MarkerKind::TableBasic,
        MarkerKind::TableStriped,
        MarkerKind::TableBordered,
        MarkerKind::TableHover,
        MarkerKind::TableCondensed,
        MarkerKind::TableResponsive,
        MarkerKind::ListInline,
        MarkerKind::ListUnstyled,
        MarkerKind::DetailsSummary,
        MarkerKind::DetailsContent,
        MarkerKind::AccordionStart,
        MarkerKind::AccordionHeading,
        MarkerKind::AccordionPanel,
        MarkerKind::AccordionEnd,
        MarkerKind::PaginationStart,
        MarkerKind::PaginationItem,
        MarkerKind::PaginationActive,
        MarkerKind::PaginationDisabled,
        MarkerKind::PaginationEnd,
    ];

    /// The attribute value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::AlertSuccess => "alert-success",
            MarkerKind::AlertInfo => "alert-info",
            MarkerKind::AlertWarning => "alert-warning",
            MarkerKind::AlertDanger => "alert-danger",
            MarkerKind::TableBasic => "table-basic",
            MarkerKind::TableStriped => "table-striped",
            MarkerKind::TableBordered => "table-bordered",
            MarkerKind::TableHover => "table-hover",
            MarkerKind::TableCondensed => "table-condensed",
            MarkerKind::TableResponsive => "table-responsive",
            MarkerKind::ListInline => "list-inline",
            MarkerKind::ListUnstyled => "list-unstyled",
            MarkerKind::DetailsSummary => "details-summary",
            MarkerKind::DetailsContent => "details-content",
            MarkerKind::AccordionStart => "accordion-start",
            MarkerKind::AccordionHeading => "accordion-heading",
            MarkerKind::AccordionPanel => "accordion-panel",
            MarkerKind::AccordionEnd => "accordion-end",
            MarkerKind::PaginationStart => "pagination-start",
            MarkerKind::PaginationItem => "pagination-item",
            MarkerKind::PaginationActive => "pagination-active",
            MarkerKind::PaginationDisabled => "pagination-disabled",
            MarkerKind::PaginationEnd => "pagination-end",
        }
    }

    /// Parse an attribute value. Unknown values are not markers.
    pub fn parse(value: &str) -> Option<MarkerKind> {
        let value = value.trim();
        MarkerKind::ALL.into_iter().find(|k| k.as_str() == value)
    }

    pub fn family(self) -> MarkerFamily {
        match self {
            MarkerKind::AlertSuccess
            | MarkerKind::AlertInfo
            | MarkerKind::AlertWarning
            | MarkerKind::AlertDanger => MarkerFamily::Alert,
            MarkerKind::TableBasic
            | MarkerKind::TableStriped
            | MarkerKind::TableBordered
            | MarkerKind::TableHover
            | MarkerKind::TableCondensed
            | MarkerKind::TableResponsive => MarkerFamily::Table,
            MarkerKind::ListInline | MarkerKind::ListUnstyled => MarkerFamily::List,
            MarkerKind::DetailsSummary | MarkerKind::DetailsContent => MarkerFamily::Details,
            MarkerKind::AccordionStart
            | MarkerKind::AccordionHeading
            | MarkerKind::AccordionPanel
            | MarkerKind::AccordionEnd => MarkerFamily::Accordion,
            MarkerKind::PaginationStart
            | MarkerKind::PaginationItem
            | MarkerKind::PaginationActive
            | MarkerKind::PaginationDisabled
            | MarkerKind::PaginationEnd => MarkerFamily::Pagination,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker kind of a node, if it is a marker.
pub fn marker_kind(dom: &Dom, id: NodeId) -> Option<MarkerKind> {
    dom.get_attr(id, MARKER_ATTR).and_then(MarkerKind::parse)
}

/// Marker kind of a node, if it belongs to `family`.
pub fn marker_in(dom: &Dom, id: NodeId, family: MarkerFamily) -> Option<MarkerKind> {
    marker_kind(dom, id).filter(|k| k.family() == family)
}
