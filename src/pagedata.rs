//! Embedded page-data extraction.
//!
//! Bandcamp pages carry their state as a JSON blob inside the `data-blob`
//! attribute of a `pagedata` element. The blob is located with a plain text
//! scan over the document lines rather than a DOM parse: a single attribute
//! on one known element does not justify an HTML parser dependency. The
//! scan stays behind this module so callers never see the mechanics and the
//! strategy can be swapped without touching them.

use serde_json::Value;

use crate::error::SyncError;

const CONTAINER_MARKER: &str = "pagedata";
const BLOB_ATTRIBUTE: &str = "data-blob=\"";

/// Extracts the embedded page-data blob from an HTML document.
///
/// Scans for the first line containing both the `pagedata` container marker
/// and a `data-blob` attribute, entity-decodes that attribute's value and
/// parses it as JSON.
///
/// # Errors
///
/// [`SyncError::PageData`] when no line matches, [`SyncError::Json`] when
/// the decoded attribute is not valid JSON.
pub fn extract(html: &str) -> Result<Value, SyncError> {
    let line = html
        .lines()
        .find(|line| line.contains(CONTAINER_MARKER) && line.contains(BLOB_ATTRIBUTE))
        .ok_or_else(|| {
            SyncError::PageData("no pagedata element with a data-blob attribute".to_string())
        })?;

    let raw = line
        .split(BLOB_ATTRIBUTE)
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .ok_or_else(|| SyncError::PageData("malformed data-blob attribute".to_string()))?;

    serde_json::from_str(&decode_entities(raw)).map_err(SyncError::Json)
}

/// Decodes the HTML entities Bandcamp emits inside the attribute value.
///
/// Covers the named entities attribute encoding produces (`&quot;`,
/// `&amp;`, `&lt;`, `&gt;`, `&apos;`) plus decimal and hex character
/// references. Anything unrecognized keeps its literal ampersand.
pub fn decode_entities(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;

    loop {
        let Some(start) = rest.find('&') else {
            out.push_str(rest);
            return out;
        };

        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let Some(end) = rest.find(';') else {
            out.push_str(rest);
            return out;
        };

        match decode_entity(&rest[..=end]) {
            Some(decoded) => {
                out.push(decoded);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "&quot;" => Some('"'),
        "&amp;" => Some('&'),
        "&lt;" => Some('<'),
        "&gt;" => Some('>'),
        "&apos;" => Some('\''),
        _ => {
            let body = entity.strip_prefix("&#")?.strip_suffix(';')?;
            let code = match body.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => body.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
