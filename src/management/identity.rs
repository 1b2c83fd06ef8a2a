use base64::{Engine, engine::general_purpose::STANDARD};

use crate::config;

pub struct IdentityManager;

impl IdentityManager {
    /// Resolves the identity cookie value from the CLI override or the
    /// environment. Returns the percent-encoded cookie value, or `None`
    /// when no credential is available anywhere.
    pub fn resolve(flag: Option<String>) -> Option<String> {
        let raw = flag.or_else(config::identity_cookie)?;
        Some(Self::normalize(&raw))
    }

    /// A token may be handed over raw or Base64-wrapped. It only counts as
    /// Base64 when re-encoding the decoded bytes reproduces the input
    /// exactly, otherwise a raw cookie that merely looks like Base64 would
    /// get mangled. Either way the result is percent-encoded with no safe
    /// characters, ready to be used as the cookie value.
    pub fn normalize(raw: &str) -> String {
        match STANDARD.decode(raw) {
            Ok(bytes) if STANDARD.encode(&bytes) == raw => {
                urlencoding::encode_binary(&bytes).into_owned()
            }
            _ => urlencoding::encode(raw).into_owned(),
        }
    }
}
