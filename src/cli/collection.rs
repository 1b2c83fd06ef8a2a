use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::management::LibraryManager;
use crate::types::{PageRequest, Partition, PurchaseItem};
use crate::{bandcamp, error, error::SyncError, info, success};

/// Walks both collection partitions and downloads every purchase that is
/// missing locally, in the requested format, into the working directory.
pub async fn sync_collection(identity: &str, format: &str) {
    match run(identity, format).await {
        Ok((downloaded, skipped)) => {
            success!(
                "Collection synced: {} downloaded, {} already present",
                downloaded,
                skipped
            );
        }
        Err(e) => {
            error!("Sync aborted: {}", e);
        }
    }
}

async fn run(identity: &str, format: &str) -> Result<(u64, u64), SyncError> {
    let library = LibraryManager::new(".");

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching collection...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let summary = bandcamp::collection::collection_summary(identity).await?;
    let page =
        bandcamp::collection::fan_page(identity, &summary.collection_summary.username).await?;
    pb.finish_and_clear();

    let mut downloaded = 0;
    let mut skipped = 0;

    for partition in Partition::ALL {
        log::info!("walking the {} partition", partition);
        let data = page.partition_data(partition);

        for item in page.cached_items(partition) {
            process_item(&library, identity, format, &item, &mut downloaded, &mut skipped)
                .await?;
        }

        let mut cursor = data
            .last_token
            .clone()
            .map(|token| PageRequest::first(summary.fan_id, partition, token));

        while let Some(request) = cursor {
            let (items, next) = bandcamp::collection::collection_page(identity, &request).await?;

            for item in items {
                process_item(&library, identity, format, &item, &mut downloaded, &mut skipped)
                    .await?;
            }

            cursor = next;
        }
    }

    Ok((downloaded, skipped))
}

async fn process_item(
    library: &LibraryManager,
    identity: &str,
    format: &str,
    item: &PurchaseItem,
    downloaded: &mut u64,
    skipped: &mut u64,
) -> Result<(), SyncError> {
    if library.is_complete(item).await? {
        info!(
            "{} - {} ({}): already downloaded",
            item.artist, item.title, item.id
        );
        *skipped += 1;
        return Ok(());
    }

    info!("{} - {} ({}): downloading...", item.artist, item.title, item.id);
    let url = bandcamp::download::resolve_download(identity, &item.download_url, format).await?;
    let filename = bandcamp::download::download_item(Path::new("."), item, &url).await?;
    success!("{}", filename);
    *downloaded += 1;

    Ok(())
}
