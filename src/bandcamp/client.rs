use reqwest::{Client, header};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{config, error::SyncError};

/// Issues an authenticated JSON request against the Bandcamp API.
///
/// A request without a body is a GET, one with a body is a POST carrying a
/// JSON payload. Every request goes out with the fixed user agent and the
/// `identity` cookie.
///
/// Some endpoints guard their payloads with an anti-forgery crumb and
/// answer `error: "invalid_crumb"` together with the current crumb when it
/// is stale or absent. In that case the payload is rebuilt with the fresh
/// crumb grafted in and the call re-issued once; a second rejection is
/// fatal.
///
/// # Errors
///
/// [`SyncError::Http`] for connection failures and non-2xx statuses,
/// [`SyncError::Json`] when the body does not decode into `T`.
pub async fn api_json<T: DeserializeOwned>(
    identity: &str,
    path: &str,
    body: Option<&Value>,
) -> Result<T, SyncError> {
    let url = format!("{}/{}", config::api_url(), path);
    let client = Client::new();
    let mut payload = body.cloned();
    let mut crumb_refreshed = false;

    loop {
        log::info!("fetch {} as json", url);
        let request = match &payload {
            Some(data) => client.post(&url).json(data),
            None => client.get(&url),
        };

        let response = request
            .header(header::USER_AGENT, config::user_agent())
            .header(header::COOKIE, format!("identity={}", identity))
            .send()
            .await?
            .error_for_status()?;

        let value: Value = response.json().await?;

        if value.get("error").and_then(Value::as_str) == Some("invalid_crumb") && !crumb_refreshed {
            let (Some(data), Some(crumb)) = (&payload, value.get("crumb")) else {
                return Err(SyncError::Protocol(
                    "invalid_crumb response without a fresh crumb".to_string(),
                ));
            };

            // rebuild the payload with the crumb instead of patching shared state
            let mut refreshed = data.clone();
            refreshed["crumb"] = crumb.clone();
            payload = Some(refreshed);
            crumb_refreshed = true;
            continue;
        }

        return serde_json::from_value(value).map_err(SyncError::Json);
    }
}

/// Fetches a page as text with the identity cookie attached.
pub async fn fetch_html(identity: &str, url: &str) -> Result<String, SyncError> {
    log::info!("fetch {} as html", url);
    let client = Client::new();
    let response = client
        .get(url)
        .header(header::USER_AGENT, config::user_agent())
        .header(header::COOKIE, format!("identity={}", identity))
        .send()
        .await?
        .error_for_status()?;

    Ok(response.text().await?)
}

/// Fetches an arbitrary URL as JSON with an explicit accept header.
///
/// The statdownload endpoint content-negotiates and serves an HTML page
/// unless asked for `application/json` outright.
pub async fn stat_json(identity: &str, url: &str) -> Result<Value, SyncError> {
    log::info!("fetch {} as json", url);
    let client = Client::new();
    let response = client
        .get(url)
        .header(header::USER_AGENT, config::user_agent())
        .header(header::COOKIE, format!("identity={}", identity))
        .header(header::ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json().await?)
}
