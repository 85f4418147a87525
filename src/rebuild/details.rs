//! Pass 3: Details/summary blocks

use crate::dom::{Dom, NodeId};
use crate::marker::{MarkerFamily, MarkerKind, marker_in};

use super::RebuildReport;
use super::policy::{Policy, StrayContent};
use super::scan::paragraph_from;

/// Fold each `details-summary` marker and the `details-content` markers that
/// follow it into one `<details>` element.
///
/// ```text
/// Before: [summary "Q", content "A1", content "A2", X]
/// After:  [details > (summary "Q", p "A1", p "A2"), X]
/// ```
///
/// Collection stops at the first sibling that is not a content marker.
/// Whitespace between markers does not stop it. Content markers with no
/// summary in front are handled per [`Policy::stray_details_content`].
///
/// The pass reads a snapshot of the container's children and relinks the
/// container once at the end, so no edit can shift a position still to be
/// visited.
pub fn build_details(dom: &mut Dom, container: NodeId, policy: &Policy, report: &mut RebuildReport) {
    let kids = dom.child_vec(container);
    let mut out: Vec<NodeId> = Vec::with_capacity(kids.len());
    let mut i = 0;

    while i < kids.len() {
        let id = kids[i];
        match marker_in(dom, id, MarkerFamily::Details) {
            Some(MarkerKind::DetailsSummary) => {
                let details = dom.element("details", &[]);
                let summary = dom.element("summary", &[]);
                dom.append(details, summary);
                dom.move_children(id, summary);
                i += 1;

                // Blanks only belong to the block if more content follows them.
                let mut trailing_blanks = Vec::new();
                while let Some(&next) = kids.get(i) {
                    if dom.is_blank(next) {
                        trailing_blanks.push(next);
                    } else if marker_in(dom, next, MarkerFamily::Details)
                        == Some(MarkerKind::DetailsContent)
                    {
                        let p = paragraph_from(dom, next);
                        dom.append(details, p);
                        trailing_blanks.clear();
                    } else {
                        break;
                    }
                    i += 1;
                }

                out.push(details);
                out.extend(trailing_blanks);
                report.details += 1;
            }
            Some(_) => {
                match policy.stray_details_content {
                    StrayContent::Drop => report.swept += 1,
                    StrayContent::KeepAsParagraph => out.push(paragraph_from(dom, id)),
                }
                i += 1;
            }
            None => {
                out.push(id);
                i += 1;
            }
        }
    }

    dom.replace_children(container, &out);
}
