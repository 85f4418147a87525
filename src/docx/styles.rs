//! `word/styles.xml`: paragraph style ids to display names.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Result;

use super::xml::{attr_value, local_name};

/// Paragraph styles declared by the document.
///
/// Paragraphs reference styles by id (`Heading1`, `WETAlertInfo`); the style
/// map is keyed by display name (`heading 1`, `WET Alert Info`).
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleSheet {
    /// Display name for a style id.
    pub fn name_for(&self, style_id: &str) -> Option<&str> {
        self.names.get(style_id).map(String::as_str)
    }

    /// Id of the style applied to paragraphs without `w:pStyle`.
    pub fn default_paragraph(&self) -> Option<&str> {
        self.default_paragraph.as_deref()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parse `word/styles.xml`.
pub fn parse_styles(content: &str) -> Result<StyleSheet> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut sheet = StyleSheet::default();
    // (style id, is default) of the paragraph style being read
    let mut current: Option<(String, bool)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if local_name(e.name().as_ref()) == b"style" => {
                current = paragraph_style(&e)?;
            }
            Event::Start(e) | Event::Empty(e) if local_name(e.name().as_ref()) == b"name" => {
                if let (Some((id, is_default)), Some(name)) = (&current, attr_value(&e, b"val")?) {
                    if *is_default {
                        sheet.default_paragraph = Some(id.clone());
                    }
                    sheet.names.insert(id.clone(), name);
                }
            }
            Event::End(e) if local_name(e.name().as_ref()) == b"style" => current = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(sheet)
}

/// `(styleId, w:default)` if `e` opens a paragraph style.
fn paragraph_style(e: &BytesStart) -> Result<Option<(String, bool)>> {
    if attr_value(e, b"type")?.as_deref() != Some("paragraph") {
        return Ok(None);
    }
    let is_default = matches!(attr_value(e, b"default")?.as_deref(), Some("1" | "true"));
    Ok(attr_value(e, b"styleId")?.map(|id| (id, is_default)))
}
