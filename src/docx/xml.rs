//! Shared quick-xml helpers for the WordprocessingML parts.

use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::BytesStart;

use crate::error::{Error, Result};

/// Extract local name from namespaced XML name (e.g., "w:pStyle" -> "pStyle").
pub fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Unescaped value of the attribute whose local name is `key` (`w:val` matches `val`).
pub fn attr_value(e: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if local_name(attr.key.as_ref()) == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Whether a toggle property like `<w:b/>` or `<w:b w:val="0"/>` is on.
pub fn toggle_on(e: &BytesStart) -> Result<bool> {
    Ok(!matches!(
        attr_value(e, b"val")?.as_deref(),
        Some("0" | "false" | "off" | "none")
    ))
}

/// Resolve XML entity references.
pub fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => return Some('\''),
        "quot" => return Some('"'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "amp" => return Some('&'),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

/// Decode an XML part to a string.
///
/// A byte order mark wins, then the `<?xml encoding="..."?>` declaration.
/// Anything else must be valid UTF-8.
pub fn decode_part(part: &str, bytes: Vec<u8>) -> Result<String> {
    let declared = extract_xml_encoding(&bytes).and_then(|label| Encoding::for_label(label.as_bytes()));
    let encoding = Encoding::for_bom(&bytes)
        .map(|(encoding, _)| encoding)
        .or(declared)
        .unwrap_or(UTF_8);

    if encoding == UTF_8 {
        let bytes = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            bytes[3..].to_vec()
        } else {
            bytes
        };
        return Ok(String::from_utf8(bytes)?);
    }

    let (text, _, malformed) = encoding.decode(&bytes);
    if malformed {
        return Err(Error::InvalidDocx(format!(
            "{part} is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Encoding label from an XML declaration in the first 100 bytes.
fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(100)];
    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let quote = *after_enc.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value_end = after_enc[1..].iter().position(|&b| b == quote)? + 1;

    std::str::from_utf8(&after_enc[1..value_end]).ok()
}
