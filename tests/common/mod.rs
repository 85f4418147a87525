//! In-memory `.docx` fixtures.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Builds a minimal WordprocessingML package paragraph by paragraph.
#[derive(Default)]
pub struct DocxBuilder {
    styles: Vec<(String, String)>,
    body: String,
}

impl DocxBuilder {
    pub fn new() -> Self {
        let mut builder = Self::default();
        builder.style("Normal", "Normal");
        for level in 1..=3 {
            builder.style(&format!("Heading{level}"), &format!("heading {level}"));
        }
        builder.style("ListBullet", "List Bullet");
        builder.style("ListNumber", "List Number");
        builder
    }

    /// Declare a paragraph style; its id is the name without spaces.
    pub fn style(&mut self, id: &str, name: &str) -> &mut Self {
        self.styles.push((id.to_string(), name.to_string()));
        self
    }

    /// A paragraph with the named style, declaring the style if needed.
    pub fn styled(&mut self, name: &str, text: &str) -> &mut Self {
        let id: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        if !self.styles.iter().any(|(i, _)| *i == id) {
            self.style(&id, name);
        }
        self.body.push_str(&format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{id}"/></w:pPr>{}</w:p>"#,
            run(text)
        ));
        self
    }

    /// A paragraph without `w:pStyle`.
    pub fn plain(&mut self, text: &str) -> &mut Self {
        self.body.push_str(&format!("<w:p>{}</w:p>", run(text)));
        self
    }

    /// A table of plain cell text.
    pub fn table(&mut self, rows: &[&[&str]]) -> &mut Self {
        self.body.push_str("<w:tbl><w:tblPr/>");
        for row in rows {
            self.body.push_str("<w:tr>");
            for cell in *row {
                self.body
                    .push_str(&format!("<w:tc><w:p>{}</w:p></w:tc>", run(cell)));
            }
            self.body.push_str("</w:tr>");
        }
        self.body.push_str("</w:tbl>");
        self
    }

    /// Raw body XML.
    pub fn raw(&mut self, xml: &str) -> &mut Self {
        self.body.push_str(xml);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut styles = format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:styles xmlns:w="{W_NS}">"#);
        for (id, name) in &self.styles {
            let default = if id == "Normal" { r#" w:default="1""# } else { "" };
            styles.push_str(&format!(
                r#"<w:style w:type="paragraph"{default} w:styleId="{id}"><w:name w:val="{name}"/></w:style>"#
            ));
        }
        styles.push_str("</w:styles>");

        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="{W_NS}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            self.body
        );

        zip_parts(&[
            ("[Content_Types].xml", "<Types/>"),
            ("word/styles.xml", &styles),
            ("word/document.xml", &document),
        ])
    }
}

fn run(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(r#"<w:r><w:t xml:space="preserve">{escaped}</w:t></w:r>"#)
}

/// Zip the given parts, uncompressed.
pub fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in parts {
        zip.start_file(*name, stored).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}
