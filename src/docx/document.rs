//! `word/document.xml`: the body as a flat list of paragraphs and tables.
//!
//! Only what the HTML output needs is kept: paragraph style, list
//! numbering, run text with bold/italic/underline, and table cell text.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Result;

use super::xml::{attr_value, local_name, resolve_entity, toggle_on};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text { text: String, format: RunFormat },
    Break,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style_id: Option<String>,
    /// Has `w:numPr`.
    pub numbered: bool,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    fn push_text(&mut self, text: &str, format: RunFormat) {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text { text: last, format: f }) = self.inlines.last_mut()
            && *f == format
        {
            last.push_str(text);
            return;
        }
        self.inlines.push(Inline::Text {
            text: text.to_string(),
            format,
        });
    }

    /// Text with breaks as newlines.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text { text, .. } => out.push_str(text),
                Inline::Break => out.push('\n'),
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.iter().all(|i| match i {
            Inline::Text { text, .. } => text.trim().is_empty(),
            Inline::Break => false,
        })
    }
}

/// A table as rows of cell text.
pub type Table = Vec<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Parsed body.
#[derive(Debug, Default)]
pub struct Body {
    pub blocks: Vec<Block>,
    /// Tables found inside table cells; their text went into the outer cell.
    pub nested_tables: usize,
}

/// Parser position inside the body.
#[derive(Default)]
struct Cursor {
    paragraph: Option<Paragraph>,
    /// `w:p` nesting (text boxes put paragraphs inside paragraphs).
    p_depth: usize,
    in_run: bool,
    in_text: bool,
    format: RunFormat,

    table_depth: usize,
    rows: Table,
    row: Vec<String>,
    cell: Option<String>,
}

/// Parse `word/document.xml`.
pub fn parse_document(content: &str) -> Result<Body> {
    let mut reader = Reader::from_str(content);
    // w:t content keeps its spaces
    reader.config_mut().trim_text(false);

    let mut body = Body::default();
    let mut cur = Cursor::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => start_element(&e, &mut cur, &mut body)?,
            Event::Empty(e) => {
                start_element(&e, &mut cur, &mut body)?;
                end_element(local_name(e.name().as_ref()), &mut cur, &mut body);
            }
            Event::End(e) => end_element(local_name(e.name().as_ref()), &mut cur, &mut body),
            Event::Text(e) if cur.in_text => {
                let text = String::from_utf8_lossy(e.as_ref());
                if let Some(p) = cur.paragraph.as_mut() {
                    p.push_text(&text, cur.format);
                }
            }
            Event::GeneralRef(e) if cur.in_text => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let (Some(c), Some(p)) = (resolve_entity(&entity), cur.paragraph.as_mut()) {
                    p.push_text(c.encode_utf8(&mut [0; 4]), cur.format);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(body)
}

fn start_element(e: &BytesStart, cur: &mut Cursor, body: &mut Body) -> Result<()> {
    match local_name(e.name().as_ref()) {
        b"p" => {
            if cur.p_depth == 0 {
                cur.paragraph = Some(Paragraph::default());
            }
            cur.p_depth += 1;
        }
        b"pStyle" if !cur.in_run && cur.p_depth == 1 => {
            if let Some(p) = cur.paragraph.as_mut() {
                p.style_id = attr_value(e, b"val")?;
            }
        }
        b"numPr" if !cur.in_run => {
            if let Some(p) = cur.paragraph.as_mut() {
                p.numbered = true;
            }
        }
        b"r" => {
            cur.in_run = true;
            cur.format = RunFormat::default();
        }
        b"b" if cur.in_run => cur.format.bold = toggle_on(e)?,
        b"i" if cur.in_run => cur.format.italic = toggle_on(e)?,
        b"u" if cur.in_run => cur.format.underline = toggle_on(e)?,
        b"t" if cur.in_run => cur.in_text = true,
        b"br" | b"cr" if cur.in_run => {
            if let Some(p) = cur.paragraph.as_mut() {
                p.inlines.push(Inline::Break);
            }
        }
        b"tab" if cur.in_run => {
            if let Some(p) = cur.paragraph.as_mut() {
                p.push_text(" ", cur.format);
            }
        }
        b"tbl" => {
            cur.table_depth += 1;
            if cur.table_depth == 1 {
                cur.rows.clear();
            } else {
                body.nested_tables += 1;
            }
        }
        b"tr" if cur.table_depth == 1 => cur.row.clear(),
        b"tc" if cur.table_depth == 1 => cur.cell = Some(String::new()),
        _ => {}
    }
    Ok(())
}

fn end_element(local: &[u8], cur: &mut Cursor, body: &mut Body) {
    match local {
        b"p" => {
            cur.p_depth = cur.p_depth.saturating_sub(1);
            if cur.p_depth > 0 {
                return;
            }
            let Some(paragraph) = cur.paragraph.take() else {
                return;
            };
            if cur.table_depth == 0 {
                body.blocks.push(Block::Paragraph(paragraph));
            } else if let Some(cell) = cur.cell.as_mut() {
                if !cell.is_empty() {
                    cell.push('\n');
                }
                cell.push_str(&paragraph.plain_text());
            }
        }
        b"r" => {
            cur.in_run = false;
            cur.in_text = false;
        }
        b"t" => cur.in_text = false,
        b"tc" if cur.table_depth == 1 => {
            if let Some(cell) = cur.cell.take() {
                cur.row.push(cell.trim().to_string());
            }
        }
        b"tr" if cur.table_depth == 1 => {
            let row = std::mem::take(&mut cur.row);
            cur.rows.push(row);
        }
        b"tbl" => {
            if cur.table_depth == 1 {
                let rows = std::mem::take(&mut cur.rows);
                if rows.iter().any(|r| !r.is_empty()) {
                    body.blocks.push(Block::Table(rows));
                }
            }
            cur.table_depth = cur.table_depth.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    fn paragraphs(body: &Body) -> Vec<&Paragraph> {
        body.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p),
                Block::Table(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_paragraph_style_and_runs() {
        let body = parse_document(&doc(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:rPr><w:b/></w:rPr></w:pPr><w:r><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:rPr><w:b/><w:i w:val="0"/></w:rPr><w:t>world</w:t></w:r></w:p>"#,
        ))
        .unwrap();

        let p = paragraphs(&body)[0];
        assert_eq!(p.style_id.as_deref(), Some("Heading1"));
        assert_eq!(
            p.inlines,
            vec![
                Inline::Text {
                    text: "Hello ".into(),
                    format: RunFormat::default()
                },
                Inline::Text {
                    text: "world".into(),
                    format: RunFormat {
                        bold: true,
                        ..RunFormat::default()
                    }
                },
            ]
        );
    }

    #[test]
    fn test_entities_breaks_and_tabs() {
        let body = parse_document(&doc(
            r#"<w:p><w:r><w:t>A &amp; B</w:t><w:br/><w:tab/><w:t>C</w:t></w:r></w:p>"#,
        ))
        .unwrap();

        assert_eq!(paragraphs(&body)[0].plain_text(), "A & B\n C");
    }

    #[test]
    fn test_tab_stops_are_not_text() {
        let body = parse_document(&doc(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        ))
        .unwrap();

        assert_eq!(paragraphs(&body)[0].plain_text(), "x");
    }

    #[test]
    fn test_numbering_marks_list_paragraphs() {
        let body = parse_document(&doc(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>item</w:t></w:r></w:p>"#,
        ))
        .unwrap();

        assert!(paragraphs(&body)[0].numbered);
    }

    #[test]
    fn test_table_cells() {
        let body = parse_document(&doc(concat!(
            "<w:tbl><w:tblPr/>",
            "<w:tr><w:tc><w:p><w:r><w:t> Name </w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Age</w:t></w:r></w:p></w:tc></w:tr>",
            "<w:tr><w:tc><w:p><w:r><w:t>Ann</w:t></w:r></w:p><w:p><w:r><w:t>B.</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr>",
            "</w:tbl>"
        )))
        .unwrap();

        assert_eq!(
            body.blocks,
            vec![Block::Table(vec![
                vec!["Name".to_string(), "Age".to_string()],
                vec!["Ann\nB.".to_string(), String::new()],
            ])]
        );
    }

    #[test]
    fn test_nested_table_is_flattened() {
        let body = parse_document(&doc(concat!(
            "<w:tbl><w:tr><w:tc>",
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            "<w:p/></w:tc></w:tr></w:tbl>",
            "<w:p><w:r><w:t>after</w:t></w:r></w:p>"
        )))
        .unwrap();

        assert_eq!(body.nested_tables, 1);
        assert_eq!(body.blocks[0], Block::Table(vec![vec!["inner".to_string()]]));
        assert_eq!(paragraphs(&body)[0].plain_text(), "after");
    }

    #[test]
    fn test_empty_table_is_skipped() {
        let body = parse_document(&doc("<w:tbl><w:tblPr/></w:tbl>")).unwrap();
        assert!(body.blocks.is_empty());
    }

    #[test]
    fn test_field_instructions_are_not_text() {
        let body = parse_document(&doc(
            r#"<w:p><w:r><w:instrText>PAGE</w:instrText></w:r><w:r><w:t>1</w:t></w:r></w:p>"#,
        ))
        .unwrap();

        assert_eq!(paragraphs(&body)[0].plain_text(), "1");
    }
}
