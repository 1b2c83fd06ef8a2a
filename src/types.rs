use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// How many items one paginated collection request asks for. The server
/// clamps this on its side; the value is otherwise opaque to the pipeline.
pub const COLLECTION_PAGE_SIZE: u32 = 100;

/// One of the two listings a fan's purchases are split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Collection,
    Hidden,
}

impl Partition {
    /// Processing order is fixed: the visible collection before the hidden
    /// one.
    pub const ALL: [Partition; 2] = [Partition::Collection, Partition::Hidden];

    /// The paginated items endpoint for this partition, relative to the
    /// API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Partition::Collection => "fancollection/1/collection_items",
            Partition::Hidden => "fancollection/1/hidden_items",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Collection => write!(f, "collection"),
            Partition::Hidden => write!(f, "hidden"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSummary {
    pub fan_id: u64,
    pub collection_summary: SummaryData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryData {
    pub username: String,
}

/// The embedded page data of a fan's public profile page: a cached first
/// page of both partitions plus their current pagination cursors.
#[derive(Debug, Clone, Deserialize)]
pub struct FanPageData {
    pub fan_data: FanData,
    #[serde(default)]
    pub collection_data: PartitionData,
    #[serde(default)]
    pub hidden_data: PartitionData,
    #[serde(default)]
    pub item_cache: ItemCache,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FanData {
    pub fan_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartitionData {
    /// Cache keys of the pre-rendered first page, in display order.
    #[serde(default)]
    pub sequence: Vec<String>,
    #[serde(default)]
    pub last_token: Option<String>,
    #[serde(default)]
    pub redownload_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemCache {
    #[serde(default)]
    pub collection: HashMap<String, CollectionEntry>,
    #[serde(default)]
    pub hidden: HashMap<String, CollectionEntry>,
}

/// A raw collection entry as the platform reports it, either from the
/// profile page cache or a paginated items response.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionEntry {
    pub band_name: String,
    pub item_title: String,
    #[serde(default)]
    pub sale_item_id: Option<u64>,
    #[serde(default)]
    pub sale_item_type: Option<String>,
    /// Null for entries that are not real downloadable purchases.
    #[serde(default)]
    pub featured_track: Value,
    #[serde(default)]
    pub num_streamable_tracks: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionItemsResponse {
    #[serde(default)]
    pub items: Vec<CollectionEntry>,
    #[serde(default)]
    pub more_available: bool,
    #[serde(default)]
    pub last_token: Option<String>,
    #[serde(default)]
    pub redownload_urls: HashMap<String, String>,
}

impl CollectionItemsResponse {
    /// The request for the page after the one this response answered,
    /// present only while the server reports more items. Pagination is
    /// bounded by this signal alone.
    pub fn next_request(&self, request: &PageRequest) -> Option<PageRequest> {
        match (self.more_available, &self.last_token) {
            (true, Some(token)) => Some(request.next(token.clone())),
            _ => None,
        }
    }
}

/// A normalized downloadable purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseItem {
    pub artist: String,
    pub title: String,
    /// Stable platform-assigned identifier; also the dedup marker embedded
    /// in local filenames.
    pub id: u64,
    /// Opaque per-purchase resolution endpoint.
    pub download_url: String,
    pub track_count: u32,
}

impl PurchaseItem {
    /// Normalizes a raw entry into a purchase.
    ///
    /// Entries with a null featured track are not downloadable and yield
    /// `None`. The download URL comes from the payload's own redownload-url
    /// map, keyed by sale type and sale id; entries the map does not know
    /// (streaming-only listings show up in hidden partitions) yield `None`
    /// as well.
    pub fn from_entry(
        entry: &CollectionEntry,
        redownload_urls: &HashMap<String, String>,
    ) -> Option<Self> {
        if entry.featured_track.is_null() {
            return None;
        }

        let id = entry.sale_item_id?;
        let sale_type = entry.sale_item_type.as_deref()?;
        let download_url = redownload_urls.get(&format!("{}{}", sale_type, id))?.clone();

        Some(PurchaseItem {
            artist: entry.band_name.clone(),
            title: entry.item_title.clone(),
            id,
            download_url,
            track_count: entry.num_streamable_tracks.unwrap_or(0),
        })
    }
}

impl FanPageData {
    pub fn partition_data(&self, partition: Partition) -> &PartitionData {
        match partition {
            Partition::Collection => &self.collection_data,
            Partition::Hidden => &self.hidden_data,
        }
    }

    /// The cached first page of a partition, normalized, in the blob's own
    /// sequence order.
    pub fn cached_items(&self, partition: Partition) -> Vec<PurchaseItem> {
        let data = self.partition_data(partition);
        let cache = match partition {
            Partition::Collection => &self.item_cache.collection,
            Partition::Hidden => &self.item_cache.hidden,
        };

        data.sequence
            .iter()
            .filter_map(|key| cache.get(key))
            .filter_map(|entry| PurchaseItem::from_entry(entry, &data.redownload_urls))
            .collect()
    }
}

/// Immutable request state for one paginated fetch.
///
/// Advancing the cursor builds a fresh value instead of mutating shared
/// state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub fan_id: u64,
    pub partition: Partition,
    pub older_than_token: String,
    pub count: u32,
}

impl PageRequest {
    pub fn first(fan_id: u64, partition: Partition, token: String) -> Self {
        PageRequest {
            fan_id,
            partition,
            older_than_token: token,
            count: COLLECTION_PAGE_SIZE,
        }
    }

    /// The request for the page after this one.
    pub fn next(&self, token: String) -> Self {
        PageRequest {
            older_than_token: token,
            ..self.clone()
        }
    }

    pub fn body(&self) -> Value {
        serde_json::json!({
            "fan_id": self.fan_id,
            "older_than_token": self.older_than_token,
            "count": self.count,
        })
    }
}

/// The embedded page data of a per-purchase redownload page.
#[derive(Debug, Clone, Deserialize)]
pub struct RedownloadPageData {
    #[serde(default)]
    pub digital_items: Vec<DigitalItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigitalItem {
    /// Format name to download option, e.g. "flac" or "mp3-320".
    #[serde(default)]
    pub downloads: HashMap<String, DownloadOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadOption {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatResponse {
    #[serde(default)]
    pub download_url: Option<String>,
}
