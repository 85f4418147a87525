//! Pass 4: Accordions

use crate::dom::{Dom, NodeId};
use crate::marker::{MarkerFamily, MarkerKind, marker_in};

use super::RebuildReport;
use super::policy::Policy;
use super::scan::{paragraph_from, text_element};

/// Scanner state while walking the container's children.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Outside any accordion scope.
    Idle,
    /// Between `accordion-start` and its end. `current_item` is the
    /// `<details>` that panels append to; a new heading replaces it.
    InAccordion {
        section: NodeId,
        current_item: Option<NodeId>,
    },
}

/// Build `section.wb-accordion` containers from accordion marker scopes.
///
/// ```text
/// Before: [start, heading H1, panel P1, heading H2, panel P2, end]
/// After:  [section.wb-accordion > (details(H1) > p P1, details(H2) > p P2)]
/// ```
///
/// Inside a scope:
/// - a heading opens a new item, implicitly closing the previous one
/// - a panel before any heading gets a synthesised item labelled with
///   [`Policy::accordion_fallback_label`]
/// - other content joins the current item; with no item yet, the scope ends
///   right there and that content (and everything after it, including the
///   expected end marker) stays where it is
/// - a second `accordion-start` ends the scope and opens its own
///
/// Accordion markers left outside any scope are dropped.
pub fn build_accordions(
    dom: &mut Dom,
    container: NodeId,
    policy: &Policy,
    report: &mut RebuildReport,
) {
    let kids = dom.child_vec(container);
    let mut out: Vec<NodeId> = Vec::with_capacity(kids.len());
    let mut state = State::Idle;
    let mut i = 0;

    while let Some(&id) = kids.get(i) {
        let kind = marker_in(dom, id, MarkerFamily::Accordion);
        state = match (state, kind) {
            (State::Idle, Some(MarkerKind::AccordionStart)) => {
                let section = dom.element("section", &[("class", "wb-accordion")]);
                out.push(section);
                report.accordions += 1;
                i += 1;
                State::InAccordion {
                    section,
                    current_item: None,
                }
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
            (State::InAccordion { .. }, Some(MarkerKind::AccordionEnd)) => {
                i += 1;
                State::Idle
            }
            // Not consumed: the new start is handled again from Idle.
            (State::InAccordion { .. }, Some(MarkerKind::AccordionStart)) => State::Idle,
            (State::InAccordion { section, .. }, Some(MarkerKind::AccordionHeading)) => {
                let item = new_item(dom, section);
                let summary = dom.element("summary", &[]);
                dom.move_children(id, summary);
                dom.append(item, summary);
                report.accordion_items += 1;
                i += 1;
                State::InAccordion {
                    section,
                    current_item: Some(item),
                }
            }
            (
                State::InAccordion {
                    section,
                    current_item,
                },
                Some(_),
            ) => {
                // accordion-panel
                let item = match current_item {
                    Some(item) => item,
                    None => {
                        let item = new_item(dom, section);
                        let summary =
                            text_element(dom, "summary", &[], &policy.accordion_fallback_label);
                        dom.append(item, summary);
                        report.accordion_items += 1;
                        item
                    }
                };
                let p = paragraph_from(dom, id);
                dom.append(item, p);
                i += 1;
                State::InAccordion {
                    section,
                    current_item: Some(item),
                }
            }
            (state @ State::InAccordion { .. }, None) if dom.is_blank(id) => {
                i += 1;
                state
            }
            (
                State::InAccordion {
                    section,
                    current_item: Some(item),
                },
                None,
            ) => {
                dom.append(item, id);
                i += 1;
                State::InAccordion {
                    section,
                    current_item: Some(item),
                }
            }
            // Fail closed: leave this node and the rest of the scope alone.
            (
                State::InAccordion {
                    current_item: None,
                    ..
                },
                None,
            ) => {
                log::debug!("accordion scope closed early by non-marker content");
                State::Idle
            }
        };
    }

    dom.replace_children(container, &out);
}

fn new_item(dom: &mut Dom, section: NodeId) -> NodeId {
    let item = dom.element("details", &[]);
    dom.append(section, item);
    item
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

    fn plain(dom: &mut Dom, text: &str) -> NodeId {
        let p = dom.element("p", &[]);
        dom.append_text(p, text);
        p
    }

    fn run(dom: &mut Dom, kids: &[NodeId]) -> (NodeId, RebuildReport) {
        let main = dom.element("main", &[]);
        for &k in kids {
            dom.append(main, k);
        }
        let mut report = RebuildReport::default();
        build_accordions(dom, main, &Policy::lenient(), &mut report);
        (main, report)
    }

    #[test]
    fn test_heading_implicitly_closes_previous_item() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "accordion-start", ""),
            marker(&mut dom, "accordion-heading", "H1"),
            marker(&mut dom, "accordion-panel", "P1"),
            marker(&mut dom, "accordion-heading", "H2"),
            marker(&mut dom, "accordion-panel", "P2"),
            marker(&mut dom, "accordion-end", ""),
        ];
        let (main, report) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            concat!(
                r#"<main><section class="wb-accordion">"#,
                "<details><summary>H1</summary><p>P1</p></details>",
                "<details><summary>H2</summary><p>P2</p></details>",
                "</section></main>"
            )
        );
        assert_eq!(report.accordions, 1);
        assert_eq!(report.accordion_items, 2);
    }

    #[test]
    fn test_panel_without_heading_gets_default_item() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "accordion-start", ""),
            marker(&mut dom, "accordion-panel", "P1"),
            marker(&mut dom, "accordion-end", ""),
        ];
        let (main, _) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            r#"<main><section class="wb-accordion"><details><summary>Details</summary><p>P1</p></details></section></main>"#
        );
    }

    #[test]
    fn test_plain_content_before_heading_fails_closed() {
        let mut dom = Dom::new();
        let x = plain(&mut dom, "X");
        let kids = [
            marker(&mut dom, "accordion-start", ""),
            x,
            marker(&mut dom, "accordion-heading", "late"),
            marker(&mut dom, "accordion-end", ""),
        ];
        let (main, report) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            r#"<main><section class="wb-accordion"></section><p>X</p></main>"#
        );
        assert_eq!(dom.child_vec(main)[1], x);
        assert_eq!(report.swept, 2);
    }

    #[test]
    fn test_plain_content_joins_current_item() {
        let mut dom = Dom::new();
        let table = dom.element("table", &[]);
        let kids = [
            marker(&mut dom, "accordion-start", ""),
            marker(&mut dom, "accordion-heading", "H"),
            plain(&mut dom, "loose"),
            table,
            marker(&mut dom, "accordion-end", ""),
            plain(&mut dom, "after"),
        ];
        let (main, _) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            r#"<main><section class="wb-accordion"><details><summary>H</summary><p>loose</p><table></table></details></section><p>after</p></main>"#
        );
    }

    #[test]
    fn test_second_start_opens_new_scope() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "accordion-start", ""),
            marker(&mut dom, "accordion-heading", "A"),
            marker(&mut dom, "accordion-start", ""),
            marker(&mut dom, "accordion-heading", "B"),
            marker(&mut dom, "accordion-end", ""),
        ];
        let (main, report) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            concat!(
                r#"<main><section class="wb-accordion"><details><summary>A</summary></details></section>"#,
                r#"<section class="wb-accordion"><details><summary>B</summary></details></section></main>"#
            )
        );
        assert_eq!(report.accordions, 2);
    }

    #[test]
    fn test_unterminated_scope_runs_to_end() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "accordion-start", ""),
            marker(&mut dom, "accordion-heading", "H"),
            marker(&mut dom, "accordion-panel", "P"),
        ];
        let (main, _) = run(&mut dom, &kids);

        assert_eq!(
            outer_html(&dom, main),
            r#"<main><section class="wb-accordion"><details><summary>H</summary><p>P</p></details></section></main>"#
        );
    }

    #[test]
    fn test_stray_markers_outside_scope_are_dropped() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "accordion-panel", "orphan"),
            plain(&mut dom, "keep"),
            marker(&mut dom, "accordion-end", ""),
        ];
        let (main, report) = run(&mut dom, &kids);

        assert_eq!(outer_html(&dom, main), "<main><p>keep</p></main>");
        assert_eq!(report.swept, 2);
    }

    #[test]
    fn test_custom_fallback_label() {
        let mut dom = Dom::new();
        let kids = [
            marker(&mut dom, "accordion-start", ""),
            marker(&mut dom, "accordion-panel", "P"),
        ];
        let main = dom.element("main", &[]);
        for k in kids {
            dom.append(main, k);
        }
        let policy = Policy::lenient().with_accordion_fallback_label("More");
        build_accordions(&mut dom, main, &policy, &mut RebuildReport::default());

        assert!(outer_html(&dom, main).contains("<summary>More</summary>"));
    }
}
