//! Load a converted fragment into a tree rooted at a `<main>` container.

use crate::dom::{Dom, NodeId, parse_html};

/// A parsed fragment and the container the rebuild passes work on.
pub struct Fragment {
    pub dom: Dom,
    /// `<main property="mainContentOfPage" class="container">`, holding what
    /// was in `<body>`.
    pub main: NodeId,
}

/// Parse `html` and move the body's children into a fresh `<main>`.
///
/// Top-level whitespace text is kept.
pub fn load(html: &str) -> Fragment {
    let mut dom = parse_html(html);
    let main = dom.element(
        "main",
        &[("property", "mainContentOfPage"), ("class", "container")],
    );

    // html5ever always synthesises a body
    let body = dom.find_by_tag("body").unwrap_or_else(|| dom.document());
    dom.move_children(body, main);
    dom.append(body, main);

    Fragment { dom, main }
}
