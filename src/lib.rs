//! # gcweb-docx
//!
//! Convert Word documents authored with WET/GCWeb paragraph styles into
//! GCWeb HTML: alerts, styled tables and lists, `<details>` blocks,
//! accordions and pagination.
//!
//! ## How it works
//!
//! 1. [`docx`] reads the `.docx` and turns each paragraph whose style is in
//!    the [`StyleMap`] into a marker placeholder (`<p data-wet="…">`).
//! 2. [`fragment`] loads that HTML into a mutable tree under `<main>`.
//! 3. [`rebuild`] folds each run of markers into real structure.
//! 4. [`pipeline::emit`] serializes the result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gcweb_docx::{Policy, StyleMap, convert_path};
//!
//! let output = convert_path("report.docx", &StyleMap::builtin(), &Policy::lenient())?;
//! for warning in &output.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! std::fs::write("report.html", output.html)?;
//! # Ok::<(), gcweb_docx::Error>(())
//! ```
//!
//! ## Rebuilding converted HTML
//!
//! ```
//! use gcweb_docx::{Policy, rebuild_html};
//!
//! let html = rebuild_html(
//!     r#"<p data-wet="details-summary">Why?</p><p data-wet="details-content">Because.</p>"#,
//!     &Policy::lenient(),
//! );
//! assert!(html.contains("<details><summary>Why?</summary><p>Because.</p></details>"));
//! ```

pub mod config;
pub mod docx;
pub mod dom;
pub mod error;
pub mod fragment;
pub mod marker;
pub mod pipeline;
pub mod rebuild;
pub mod style_map;

pub use config::{Config, ConfigError};
pub use docx::{Conversion, Warning};
pub use error::{Error, Result};
pub use marker::{MARKER_ATTR, MarkerFamily, MarkerKind};
pub use pipeline::{Output, convert_bytes, convert_path, emit, rebuild_html};
pub use rebuild::{Policy, RebuildReport, StrayContent, rebuild};
pub use style_map::{ElementSpec, StyleMap, StyleTarget};
