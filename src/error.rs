//! Error types for gcweb-docx operations.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while reading a document or loading settings.
///
/// Malformed marker sequences are not errors; the rebuild passes degrade
/// according to [`crate::rebuild::Policy`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid DOCX: {0}")]
    InvalidDocx(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
