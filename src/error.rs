//! The fatal error taxonomy shared by the sync pipeline.
//!
//! There is no recovery tier anywhere in this tool: transport failures,
//! malformed payloads, and filesystem problems all abort the run. The
//! variants exist so the final message names what actually went wrong, not
//! to route anything around a retry.

use std::fmt;

#[derive(Debug)]
pub enum SyncError {
    /// Connection failure or non-2xx HTTP status.
    Http(reqwest::Error),
    /// A response body that does not match the expected shape.
    Json(serde_json::Error),
    /// The structural page-data marker is missing from an HTML page.
    PageData(String),
    /// A payload that violates a platform invariant (wrong digital-item
    /// count, missing format key, stat response without a download URL).
    Protocol(String),
    Io(std::io::Error),
    Zip(zip::result::ZipError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Http(e) => write!(f, "request failed: {}", e),
            SyncError::Json(e) => write!(f, "unexpected response body: {}", e),
            SyncError::PageData(msg) => write!(f, "page data not found: {}", msg),
            SyncError::Protocol(msg) => write!(f, "unexpected platform response: {}", msg),
            SyncError::Io(e) => write!(f, "filesystem error: {}", e),
            SyncError::Zip(e) => write!(f, "archive error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Http(err)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Json(err)
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err)
    }
}

impl From<zip::result::ZipError> for SyncError {
    fn from(err: zip::result::ZipError) -> Self {
        SyncError::Zip(err)
    }
}
