//! Pass 5: Pagination

use crate::dom::{Dom, NodeId};
use crate::marker::{MarkerFamily, MarkerKind, marker_in};

use super::RebuildReport;

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    /// Inside a scope; entries go into `list` (the `ul.pagination`).
    InPagination { list: NodeId },
}

/// Build `nav > ul.pagination` from pagination marker scopes.
///
/// ```text
/// Before: [start, item "1", active "2", disabled "3", end]
/// After:  nav[aria-label=Pagination] > ul.pagination >
///           li > a[href=#] "1"
///           li.active > a[href=#][aria-current=page] "2"
///           li.disabled > span "3"
/// ```
///
/// Anything other than an entry marker (or whitespace) ends the scope at
/// once and is left in place, together with the end marker it was supposed
/// to precede. Pagination markers left outside any scope are dropped.
pub fn build_pagination(dom: &mut Dom, container: NodeId, report: &mut RebuildReport) {
    let kids = dom.child_vec(container);
    let mut out: Vec<NodeId> = Vec::with_capacity(kids.len());
    let mut state = State::Idle;
    let mut i = 0;

    while let Some(&id) = kids.get(i) {
        let kind = marker_in(dom, id, MarkerFamily::Pagination);
        state = match (state, kind) {
            (State::Idle, Some(MarkerKind::PaginationStart)) => {
                let nav = dom.element("nav", &[("aria-label", "Pagination")]);
                let list = dom.element("ul", &[("class", "pagination")]);
                dom.append(nav, list);
                out.push(nav);
                report.paginations += 1;
                i += 1;
                State::InPagination { list }
            }
            (State::Idle, Some(_)) => {
                report.swept += 1;
                i += 1;
                State::Idle
            }
            (State::Idle, None) => {
                out.push(id);
                i += 1;
                State::Idle
            }
            (State::InPagination { .. }, Some(MarkerKind::PaginationEnd)) => {
                i += 1;
                State::Idle
            }
            (State::InPagination { .. }, Some(MarkerKind::PaginationStart)) => State::Idle,
            (State::InPagination { list }, Some(entry)) => {
                let li = entry_for(dom, id, entry);
                dom.append(list, li);
                i += 1;
                State::InPagination { list }
            }
            (state @ State::InPagination { .. }, None) if dom.is_blank(id) => {
                i += 1;
                state
            }
            (State::InPagination { .. }, None) => {
                log::debug!("pagination scope closed early by non-marker content");
                State::Idle
            }
        };
    }

    dom.replace_children(container, &out);
}

/// Build one `<li>` for an entry marker.
fn entry_for(dom: &mut Dom, marker: NodeId, kind: MarkerKind) -> NodeId {
    let (li, inner) = match kind {
        MarkerKind::PaginationActive => (
            dom.element("li", &[("class", "active")]),
            dom.element("a", &[("href", "#"), ("aria-current", "page")]),
        ),
        MarkerKind::PaginationDisabled => (
            dom.element("li", &[("class", "disabled")]),
            dom.element("span", &[]),
        ),
        _ => (dom.element("li", &[]), dom.element("a", &[("href", "#")])),
    };
    fill_label(dom, marker, inner);
    dom.append(li, inner);
    li
}

/// The marker's trimmed text, or its raw content when there is no text.
fn fill_label(dom: &mut Dom, marker: NodeId, target: NodeId) {
    let text = dom.text_content(marker);
    let label = text.trim();
    if label.is_empty() {
        dom.move_children(marker, target);
    } else {
        dom.append_text(target, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::outer_html;
    use crate::marker::MARKER_ATTR;

    fn marker(dom: &mut Dom, kind: &str, text: &str) -> NodeId {
        let p = dom.element("p", &[(MARKER_ATTR, kind)]);
        dom.append_text(p, text);
        p
    }

    fn run(dom: &mut Dom, kids: &[NodeId]) -> (NodeId, RebuildReport) {
        let main = dom.element("main", &[]);
        for &k in kids {
            dom.append(main, k);
        }
        let mut report = RebuildReport::default();
        build_pagination(dom, main, &mut report);
        (main, report)
    }

    #[test]
    fn test_three_entry_kinds() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "pagination-start", ""),
            marker(&mut dom, "pagination-item", " 1 "),
            marker(&mut dom, "pagination-active", "2"),
            marker(&mut dom, "pagination-disabled", "3"),
            marker(&mut dom, "pagination-end", ""),
        ];
        let (main, report) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            concat!(
                r#"<main><nav aria-label="Pagination"><ul class="pagination">"#,
                r##"<li><a href="#">1</a></li>"##,
                r##"<li class="active"><a href="#" aria-current="page">2</a></li>"##,
                r#"<li class="disabled"><span>3</span></li>"#,
                "</ul></nav></main>"
            )
        );
        assert_eq!(report.paginations, 1);
    }

    #[test]
    fn test_foreign_content_ends_scope_and_stays() {
        let mut dom = Dom::new();
        let x = dom.element("h2", &[]);
        dom.append_text(x, "Next section");
        let kids = [
            marker(&mut dom, "pagination-start", ""),
            marker(&mut dom, "pagination-item", "1"),
            x,
            marker(&mut dom, "pagination-item", "2"),
            marker(&mut dom, "pagination-end", ""),
        ];
        let (main, report) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            concat!(
                r#"<main><nav aria-label="Pagination"><ul class="pagination">"#,
                r##"<li><a href="#">1</a></li></ul></nav>"##,
                "<h2>Next section</h2></main>"
            )
        );
        assert_eq!(report.swept, 2);
    }

    #[test]
    fn test_whitespace_does_not_end_scope() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "pagination-start", ""),
            dom.create_text("\n  ".into()),
            marker(&mut dom, "pagination-item", "1"),
            dom.create_text("\n".into()),
            marker(&mut dom, "pagination-end", ""),
        ];
        let (main, _) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            r##"<main><nav aria-label="Pagination"><ul class="pagination"><li><a href="#">1</a></li></ul></nav></main>"##
        );
    }

    #[test]
    fn test_empty_text_falls_back_to_raw_content() {
        let mut dom = Dom::new();
        let item = dom.element("p", &[(MARKER_ATTR, "pagination-item")]);
        let img = dom.element("img", &[("alt", "")]);
        dom.append(item, img);
        let kids = [marker(&mut dom, "pagination-start", ""), item];
        let (main, _) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            r##"<main><nav aria-label="Pagination"><ul class="pagination"><li><a href="#"><img alt=""></a></li></ul></nav></main>"##
        );
    }

    #[test]
    fn test_label_uses_text_of_formatted_content() {
        let mut dom = Dom::new();
        let item = dom.element("p", &[(MARKER_ATTR, "pagination-active")]);
        let strong = dom.element("strong", &[]);
        dom.append_text(strong, "Next");
        dom.append(item, strong);
        let kids = [marker(&mut dom, "pagination-start", ""), item];
        let (main, _) = run(&mut dom, &kids);

        assert!(outer_html(&dom, main).contains(r##"<a href="#" aria-current="page">Next</a>"##));
    }
}
