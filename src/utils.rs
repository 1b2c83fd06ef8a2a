use url::Url;

use crate::error::SyncError;

/// Rewrites a format download URL into its statdownload counterpart.
///
/// The `/download/` path segment becomes `/statdownload/` and the query
/// gains the `.vrs=1` marker; existing query pairs are preserved in order.
/// The stat endpoint is what mints the time-limited CDN link.
pub fn stat_url(download_url: &str) -> Result<String, SyncError> {
    let mut url = Url::parse(download_url).map_err(|e| {
        SyncError::Protocol(format!("bad download url {}: {}", download_url, e))
    })?;

    let path = url.path().replacen("/download/", "/statdownload/", 1);
    url.set_path(&path);
    url.query_pairs_mut().append_pair(".vrs", "1");

    Ok(url.to_string())
}

/// Picks the filename out of a content-disposition header value.
///
/// Prefers the RFC 5987 `filename*=UTF-8''…` parameter (percent-decoded)
/// and falls back to a plain quoted `filename=` parameter.
pub fn disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;

    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("filename*=") {
            if let Some(name) = decode_extended_value(value) {
                return Some(name);
            }
        } else if let Some(value) = part.strip_prefix("filename=") {
            plain = Some(value.trim_matches('"').to_string());
        }
    }

    plain
}

// RFC 5987 extended value: charset'language'percent-encoded
fn decode_extended_value(value: &str) -> Option<String> {
    let (charset, rest) = value.split_once('\'')?;
    let (_language, encoded) = rest.split_once('\'')?;

    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }

    urlencoding::decode(encoded).ok().map(|name| name.into_owned())
}

/// Builds the local filename for a purchase: the remote basename with the
/// purchase id spliced in before the extension, `"{basename} ({id}).{ext}"`.
/// The id marker is what later runs match on to skip the item.
pub fn local_filename(remote_name: &str, id: u64) -> String {
    match remote_name.rsplit_once('.') {
        Some((base, ext)) => format!("{} ({}).{}", base, id, ext),
        None => format!("{} ({})", remote_name, id),
    }
}
