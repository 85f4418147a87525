//! Blocks to an HTML fragment with marker placeholders.

use std::collections::HashSet;
use std::fmt::Write;

use crate::dom::{escape_attr, escape_text};
use crate::marker::{MARKER_ATTR, MarkerFamily};
use crate::style_map::{ElementSpec, StyleMap, StyleTarget};

use super::Warning;
use super::document::{Block, Inline, Paragraph, RunFormat, Table};
use super::styles::StyleSheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Number => "ol",
        }
    }
}

/// How a paragraph is rendered.
enum Role<'m> {
    Heading(u8),
    ListItem(ListKind),
    Mapped(&'m StyleTarget),
    Plain,
}

pub struct Renderer<'a> {
    styles: &'a StyleSheet,
    map: &'a StyleMap,
    out: String,
    open_list: Option<ListKind>,
    warned: HashSet<String>,
    warnings: Vec<Warning>,
}

impl<'a> Renderer<'a> {
    pub fn new(styles: &'a StyleSheet, map: &'a StyleMap) -> Self {
        Self {
            styles,
            map,
            out: String::new(),
            open_list: None,
            warned: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    pub fn render(mut self, blocks: &[Block]) -> (String, Vec<Warning>) {
        for block in blocks {
            match block {
                Block::Paragraph(p) => self.paragraph(p),
                Block::Table(rows) => {
                    self.close_list();
                    self.table(rows);
                }
            }
        }
        self.close_list();
        (self.out, self.warnings)
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    fn paragraph(&mut self, p: &Paragraph) {
        let styles: &'a StyleSheet = self.styles;
        let style_id = p.style_id.as_deref().or(styles.default_paragraph());
        let style_name = style_id.map(|id| styles.name_for(id).unwrap_or(id));
        let role = self.role(p, style_id, style_name);

        let is_marker = matches!(role, Role::Mapped(StyleTarget::Marker(_)));
        if p.is_empty() && !is_marker {
            return;
        }

        let content = inline_html(&p.inlines);
        match role {
            Role::ListItem(kind) => {
                if self.open_list != Some(kind) {
                    self.close_list();
                    let _ = writeln!(self.out, "<{}>", kind.tag());
                    self.open_list = Some(kind);
                }
                let _ = writeln!(self.out, "<li>{content}</li>");
            }
            Role::Heading(level) => {
                self.close_list();
                let _ = writeln!(self.out, "<h{level}>{content}</h{level}>");
            }
            Role::Mapped(StyleTarget::Marker(kind)) => {
                self.close_list();
                if kind.family() == MarkerFamily::Alert {
                    let _ = writeln!(
                        self.out,
                        r#"<div {MARKER_ATTR}="{kind}"><p>{content}</p></div>"#
                    );
                } else {
                    let _ = writeln!(self.out, r#"<p {MARKER_ATTR}="{kind}">{content}</p>"#);
                }
            }
            Role::Mapped(StyleTarget::Element(spec)) => {
                self.close_list();
                let html = element_html(spec, &content);
                let _ = writeln!(self.out, "{html}");
            }
            Role::Plain => {
                self.close_list();
                let _ = writeln!(self.out, "<p>{content}</p>");
            }
        }
    }

    fn role(&mut self, p: &Paragraph, style_id: Option<&str>, style_name: Option<&str>) -> Role<'a> {
        let map: &'a StyleMap = self.map;
        let Some(name) = style_name else {
            return if p.numbered {
                Role::ListItem(ListKind::Bullet)
            } else {
                Role::Plain
            };
        };

        if let Some(target) = map.get(name) {
            return Role::Mapped(target);
        }
        if let Some(level) = heading_level(name) {
            return Role::Heading(level);
        }
        if name.starts_with("List Bullet") {
            return Role::ListItem(ListKind::Bullet);
        }
        if name.starts_with("List Number") {
            return Role::ListItem(ListKind::Number);
        }
        if p.numbered {
            return Role::ListItem(ListKind::Bullet);
        }

        let is_default = style_id.is_some() && style_id == self.styles.default_paragraph();
        if !is_default && name != "Normal" && self.warned.insert(name.to_string()) {
            self.warnings.push(Warning::UnrecognisedStyle {
                name: name.to_string(),
                style_id: style_id.unwrap_or(name).to_string(),
            });
        }
        Role::Plain
    }

    fn table(&mut self, rows: &Table) {
        let Some((header, body)) = rows.split_first() else {
            return;
        };
        self.out.push_str(r#"<table class="table"><thead><tr>"#);
        for cell in header {
            let _ = write!(self.out, r#"<th scope="col">{}</th>"#, escape_text(cell));
        }
        self.out.push_str("</tr></thead><tbody>");
        for row in body {
            self.out.push_str("<tr>");
            for cell in row {
                let _ = write!(self.out, "<td>{}</td>", escape_text(cell));
            }
            self.out.push_str("</tr>");
        }
        self.out.push_str("</tbody></table>\n");
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.open_list.take() {
            let _ = writeln!(self.out, "</{}>", kind.tag());
        }
    }
}

/// `Heading 1`..`Heading 6`, in either case.
fn heading_level(style_name: &str) -> Option<u8> {
    let (prefix, level) = style_name.split_at_checked(8)?;
    if !prefix.eq_ignore_ascii_case("heading ") {
        return None;
    }
    level.trim().parse().ok().filter(|l| (1..=6).contains(l))
}

fn inline_html(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text { text, format } => out.push_str(&formatted(text, *format)),
            Inline::Break => out.push_str("<br>"),
        }
    }
    out
}

fn formatted(text: &str, format: RunFormat) -> String {
    let mut html = escape_text(text);
    if format.bold {
        html = format!("<strong>{html}</strong>");
    }
    if format.italic {
        html = format!("<em>{html}</em>");
    }
    if format.underline {
        html = format!("<u>{html}</u>");
    }
    html
}

fn element_html(spec: &ElementSpec, content: &str) -> String {
    let mut html = format!("<{}", spec.tag);
    if spec.tag == "a" {
        html.push_str(r##" href="#" role="button""##);
    }
    if let Some(class) = spec.class_attr() {
        let _ = write!(html, r#" class="{}""#, escape_attr(&class));
    }
    let _ = write!(html, ">{content}</{}>", spec.tag);

    match &spec.wrapper {
        Some(wrapper) => element_html(wrapper, &html),
        None => html,
    }
}
