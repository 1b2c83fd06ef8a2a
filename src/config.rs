//! Configuration management for the Bandcamp collection downloader.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and an optional `.env` file. Every endpoint has a
//! production default, so configuration is only needed to point the tool at
//! a test double or to supply the identity cookie through the environment
//! instead of the command line.

use std::{env, path::PathBuf};

use crate::Res;

/// Loads environment variables from a `.env` file in the working directory.
///
/// The file is optional; a missing `.env` is not an error. Values already
/// present in the process environment take precedence over file contents.
///
/// # Errors
///
/// Returns an error only when a `.env` file exists but cannot be read or
/// parsed.
pub async fn load_env() -> Res<()> {
    let path = PathBuf::from(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)?;
    Ok(())
}

/// Returns the Bandcamp site base URL.
///
/// Overridable through `BANDCAMP_URL`; defaults to the production site.
/// Fan profile pages and redownload pages are fetched relative to this.
pub fn base_url() -> String {
    env::var("BANDCAMP_URL").unwrap_or_else(|_| "https://bandcamp.com".to_string())
}

/// Returns the Bandcamp JSON API base URL.
///
/// Overridable through `BANDCAMP_API_URL`; defaults to the `/api` prefix
/// under [`base_url`].
pub fn api_url() -> String {
    env::var("BANDCAMP_API_URL").unwrap_or_else(|_| format!("{}/api", base_url()))
}

/// Returns the identity cookie value from the environment, if set.
///
/// `BANDCAMP_IDENTITY` is the fallback credential source when the
/// `--identity` flag is not given. Like the flag, it accepts the raw cookie
/// value or a Base64 wrapping of it.
pub fn identity_cookie() -> Option<String> {
    env::var("BANDCAMP_IDENTITY").ok()
}

/// Returns the fixed user-agent string attached to every outbound request.
pub fn user_agent() -> String {
    format!(
        "campdl/{} (+https://github.com/soundphilosopher/campdl)",
        env!("CARGO_PKG_VERSION")
    )
}
