use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, header};
use tokio::io::AsyncWriteExt;

use crate::error::SyncError;
use crate::types::{PurchaseItem, RedownloadPageData, StatResponse};
use crate::{config, pagedata, utils};

use super::client;

/// Resolves a purchase's redownload URL into a time-limited direct file
/// URL for the requested format.
///
/// The redownload page embeds exactly one digital item; its format entry
/// carries a generic download URL that has to be replayed through the
/// statdownload endpoint to mint the signed CDN link.
///
/// # Errors
///
/// [`SyncError::Protocol`] when the page does not hold exactly one digital
/// item, the requested format is not offered, or the stat response carries
/// no download URL.
pub async fn resolve_download(
    identity: &str,
    download_url: &str,
    format: &str,
) -> Result<String, SyncError> {
    let html = client::fetch_html(identity, download_url).await?;
    let blob = pagedata::extract(&html)?;
    let page: RedownloadPageData = serde_json::from_value(blob).map_err(SyncError::Json)?;

    let [item] = page.digital_items.as_slice() else {
        return Err(SyncError::Protocol(format!(
            "expected one digital item on the redownload page, found {}",
            page.digital_items.len()
        )));
    };

    let option = item.downloads.get(format).ok_or_else(|| {
        SyncError::Protocol(format!("format {} is not offered for this purchase", format))
    })?;

    let stat_url = utils::stat_url(&option.url)?;
    let value = client::stat_json(identity, &stat_url).await?;
    let stat: StatResponse = serde_json::from_value(value).map_err(SyncError::Json)?;

    stat.download_url.ok_or_else(|| {
        SyncError::Protocol("stat response carried no download_url".to_string())
    })
}

/// Streams a resolved download into `dir` and returns the final filename.
///
/// The filename comes from the response's content-disposition header with
/// the purchase id spliced in before the extension. The body is written
/// chunk by chunk while a byte bar tracks progress against the declared
/// content length. A transfer that fails mid-stream removes the partial
/// file before the error propagates; no partial download is ever left
/// behind.
pub async fn download_item(
    dir: &Path,
    item: &PurchaseItem,
    url: &str,
) -> Result<String, SyncError> {
    log::info!("download {}", url);
    let client = Client::new();
    let response = client
        .get(url)
        .header(header::USER_AGENT, config::user_agent())
        .send()
        .await?
        .error_for_status()?;

    let remote_name = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(utils::disposition_filename)
        .ok_or_else(|| {
            SyncError::Protocol("download response carried no usable content-disposition".to_string())
        })?;

    let filename = utils::local_filename(&remote_name, item.id);
    let target = dir.join(&filename);

    let pb = ProgressBar::new(response.content_length().unwrap_or(0));
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%)",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message(filename.clone());

    match write_stream(&target, response, &pb).await {
        Ok(()) => {
            pb.finish_and_clear();
            Ok(filename)
        }
        Err(e) => {
            pb.finish_and_clear();
            // never leave a partial download behind
            let _ = async_fs::remove_file(&target).await;
            Err(e)
        }
    }
}

async fn write_stream(
    target: &Path,
    mut response: reqwest::Response,
    pb: &ProgressBar,
) -> Result<(), SyncError> {
    let mut file = tokio::fs::File::create(target).await?;
    let mut read: u64 = 0;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        read += chunk.len() as u64;
        pb.set_position(read);
    }

    file.flush().await?;
    Ok(())
}
