//! DOCX to HTML fragment conversion.
//!
//! Paragraphs whose style is in the [`StyleMap`] become marker placeholders
//! or GCWeb elements; headings, lists, tables and plain paragraphs are
//! converted directly. The fragment still contains markers and is meant to
//! go through [`crate::rebuild`] next.
//!
//! ```no_run
//! use gcweb_docx::docx::convert_docx_path;
//! use gcweb_docx::StyleMap;
//!
//! let conversion = convert_docx_path("report.docx", &StyleMap::builtin())?;
//! for warning in &conversion.warnings {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), gcweb_docx::Error>(())
//! ```

mod document;
mod html;
mod styles;
mod xml;

pub use document::{Block, Body, Inline, Paragraph, RunFormat, parse_document};
pub use styles::{StyleSheet, parse_styles};

use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::style_map::StyleMap;

use html::Renderer;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// A non-fatal conversion problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A paragraph style with no mapping; the paragraph became a plain `<p>`.
    UnrecognisedStyle { name: String, style_id: String },
    /// A table inside a table cell; its text was merged into the cell.
    NestedTable,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnrecognisedStyle { name, style_id } => write!(
                f,
                "Unrecognised paragraph style: '{name}' (Style ID: {style_id})"
            ),
            Warning::NestedTable => f.write_str("Nested table flattened into its cell text"),
        }
    }
}

/// Converter output: an HTML fragment plus warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub html: String,
    pub warnings: Vec<Warning>,
}

/// Convert a `.docx` file on disk.
pub fn convert_docx_path<P: AsRef<Path>>(path: P, map: &StyleMap) -> Result<Conversion> {
    let file = std::fs::File::open(path)?;
    convert_docx_from_reader(file, map)
}

/// Convert a `.docx` held in memory.
pub fn convert_docx_bytes(bytes: &[u8], map: &StyleMap) -> Result<Conversion> {
    convert_docx_from_reader(Cursor::new(bytes), map)
}

/// Convert a `.docx` from any [`Read`] + [`Seek`] source.
pub fn convert_docx_from_reader<R: Read + Seek>(reader: R, map: &StyleMap) -> Result<Conversion> {
    let mut archive = ZipArchive::new(reader)?;

    let styles = match read_part(&mut archive, STYLES_PART)? {
        Some(content) => parse_styles(&content)?,
        None => StyleSheet::default(),
    };
    let content = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| Error::InvalidDocx(format!("missing {DOCUMENT_PART}")))?;
    let body = parse_document(&content)?;

    log::debug!(
        "docx: {} blocks, {} paragraph styles",
        body.blocks.len(),
        styles.len()
    );

    let mut renderer = Renderer::new(&styles, map);
    for _ in 0..body.nested_tables {
        renderer.warn(Warning::NestedTable);
    }
    let (html, warnings) = renderer.render(&body.blocks);

    Ok(Conversion { html, warnings })
}

/// Read and decode an archive member, `None` if absent.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Option<String>> {
    let bytes = match archive.by_name(path) {
        Ok(mut file) => {
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            contents
        }
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    xml::decode_part(path, bytes).map(Some)
}
