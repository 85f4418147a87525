//! End-to-end conversion: read, convert, load, rebuild, emit.

use std::path::Path;

use crate::docx::{self, Conversion, Warning};
use crate::dom::{Dom, NodeId, outer_html};
use crate::error::Result;
use crate::fragment;
use crate::rebuild::{Policy, RebuildReport, rebuild};
use crate::style_map::StyleMap;

/// Result of a full conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The `<main>` element and its content, newline terminated.
    pub html: String,
    pub warnings: Vec<Warning>,
    pub report: RebuildReport,
}

/// Convert a `.docx` file to GCWeb HTML.
///
/// ```no_run
/// use gcweb_docx::{Policy, StyleMap, convert_path};
///
/// let output = convert_path("report.docx", &StyleMap::builtin(), &Policy::lenient())?;
/// std::fs::write("report.html", &output.html)?;
/// # Ok::<(), gcweb_docx::Error>(())
/// ```
pub fn convert_path<P: AsRef<Path>>(path: P, map: &StyleMap, policy: &Policy) -> Result<Output> {
    let conversion = docx::convert_docx_path(path, map)?;
    Ok(finish(conversion, policy))
}

/// Convert a `.docx` held in memory.
pub fn convert_bytes(bytes: &[u8], map: &StyleMap, policy: &Policy) -> Result<Output> {
    let conversion = docx::convert_docx_bytes(bytes, map)?;
    Ok(finish(conversion, policy))
}

/// Run the rebuild passes over an already converted fragment.
pub fn rebuild_html(fragment_html: &str, policy: &Policy) -> String {
    rebuild_fragment(fragment_html, policy).0
}

/// Serialize the container, newline terminated.
pub fn emit(dom: &Dom, main: NodeId) -> String {
    let mut html = outer_html(dom, main);
    html.push('\n');
    html
}

fn rebuild_fragment(fragment_html: &str, policy: &Policy) -> (String, RebuildReport) {
    let mut fragment = fragment::load(fragment_html);
    let report = rebuild(&mut fragment.dom, fragment.main, policy);
    (emit(&fragment.dom, fragment.main), report)
}

fn finish(conversion: Conversion, policy: &Policy) -> Output {
    let (html, report) = rebuild_fragment(&conversion.html, policy);
    Output {
        html,
        warnings: conversion.warnings,
        report,
    }
}
