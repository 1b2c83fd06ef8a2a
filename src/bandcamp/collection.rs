use crate::error::SyncError;
use crate::types::{
    CollectionItemsResponse, CollectionSummary, FanPageData, PageRequest, PurchaseItem,
};
use crate::{config, pagedata};

use super::client;

/// Fetches the collection summary, which identifies the fan account behind
/// the identity cookie.
pub async fn collection_summary(identity: &str) -> Result<CollectionSummary, SyncError> {
    client::api_json(identity, "fan/2/collection_summary", None).await
}

/// Loads a fan's public profile page and extracts its embedded page data:
/// the cached first page of both partitions plus their pagination cursors.
pub async fn fan_page(identity: &str, username: &str) -> Result<FanPageData, SyncError> {
    let url = format!("{}/{}", config::base_url(), username);
    let html = client::fetch_html(identity, &url).await?;
    let blob = pagedata::extract(&html)?;

    serde_json::from_value(blob).map_err(SyncError::Json)
}

/// Fetches one page of a partition and normalizes its items.
///
/// Items are normalized against the response's own redownload-url map, in
/// the page's own order. The returned request is the cursor for the
/// following page; it exists only while the server reports more items, so
/// enumeration is bounded by that signal alone.
pub async fn collection_page(
    identity: &str,
    request: &PageRequest,
) -> Result<(Vec<PurchaseItem>, Option<PageRequest>), SyncError> {
    let body = request.body();
    let response: CollectionItemsResponse =
        client::api_json(identity, request.partition.endpoint(), Some(&body)).await?;

    let items = response
        .items
        .iter()
        .filter_map(|entry| PurchaseItem::from_entry(entry, &response.redownload_urls))
        .collect();
    let next = response.next_request(request);

    Ok((items, next))
}
