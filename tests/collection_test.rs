use std::collections::HashMap;

use serde_json::json;

use campdl::types::{
    COLLECTION_PAGE_SIZE, CollectionEntry, CollectionItemsResponse, FanPageData, PageRequest,
    Partition, PurchaseItem,
};

fn entry(value: serde_json::Value) -> CollectionEntry {
    serde_json::from_value(value).unwrap()
}

fn redownload_urls(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_from_entry_builds_a_purchase() {
    let entry = entry(json!({
        "band_name": "Some Band",
        "item_title": "Some Album",
        "sale_item_id": 1234567,
        "sale_item_type": "p",
        "featured_track": 99,
        "num_streamable_tracks": 12,
    }));
    let urls = redownload_urls(&[("p1234567", "https://bandcamp.com/download?id=1234567")]);

    let item = PurchaseItem::from_entry(&entry, &urls).unwrap();
    assert_eq!(item.artist, "Some Band");
    assert_eq!(item.title, "Some Album");
    assert_eq!(item.id, 1234567);
    assert_eq!(item.download_url, "https://bandcamp.com/download?id=1234567");
    assert_eq!(item.track_count, 12);
}

#[test]
fn test_from_entry_filters_null_featured_track() {
    let entry = entry(json!({
        "band_name": "Some Band",
        "item_title": "A Subscription",
        "sale_item_id": 1234567,
        "sale_item_type": "p",
        "featured_track": null,
    }));
    let urls = redownload_urls(&[("p1234567", "https://bandcamp.com/download?id=1234567")]);

    assert_eq!(PurchaseItem::from_entry(&entry, &urls), None);
}

#[test]
fn test_from_entry_filters_missing_redownload_mapping() {
    let entry = entry(json!({
        "band_name": "Some Band",
        "item_title": "Streaming Only",
        "sale_item_id": 1234567,
        "sale_item_type": "p",
        "featured_track": 99,
    }));

    assert_eq!(PurchaseItem::from_entry(&entry, &HashMap::new()), None);
}

#[test]
fn test_from_entry_defaults_missing_track_count_to_zero() {
    let entry = entry(json!({
        "band_name": "Some Band",
        "item_title": "Single",
        "sale_item_id": 7,
        "sale_item_type": "t",
        "featured_track": 1,
    }));
    let urls = redownload_urls(&[("t7", "https://bandcamp.com/download?id=7")]);

    let item = PurchaseItem::from_entry(&entry, &urls).unwrap();
    assert_eq!(item.track_count, 0);
}

#[test]
fn test_next_request_advances_while_the_server_reports_more() {
    let request = PageRequest::first(42, Partition::Collection, "tok1".to_string());
    let response: CollectionItemsResponse = serde_json::from_value(json!({
        "items": [],
        "more_available": true,
        "last_token": "tok2",
    }))
    .unwrap();

    let next = response.next_request(&request).unwrap();
    assert_eq!(next.older_than_token, "tok2");
    assert_eq!(next.fan_id, 42);
    assert_eq!(next.partition, Partition::Collection);
    assert_eq!(next.count, COLLECTION_PAGE_SIZE);

    // the original request state is rebuilt, not mutated
    assert_eq!(request.older_than_token, "tok1");
}

#[test]
fn test_next_request_stops_on_the_server_signal() {
    let request = PageRequest::first(42, Partition::Hidden, "tok1".to_string());

    let done: CollectionItemsResponse = serde_json::from_value(json!({
        "items": [],
        "more_available": false,
        "last_token": "tok2",
    }))
    .unwrap();
    assert_eq!(done.next_request(&request), None);

    let tokenless: CollectionItemsResponse = serde_json::from_value(json!({
        "items": [],
        "more_available": true,
    }))
    .unwrap();
    assert_eq!(tokenless.next_request(&request), None);
}

#[test]
fn test_page_request_body_shape() {
    let request = PageRequest::first(42, Partition::Collection, "tok1".to_string());
    let body = request.body();

    assert_eq!(body["fan_id"], 42);
    assert_eq!(body["older_than_token"], "tok1");
    assert_eq!(body["count"], COLLECTION_PAGE_SIZE);
}

#[test]
fn test_partition_endpoints_and_order() {
    assert_eq!(Partition::ALL, [Partition::Collection, Partition::Hidden]);
    assert_eq!(
        Partition::Collection.endpoint(),
        "fancollection/1/collection_items"
    );
    assert_eq!(Partition::Hidden.endpoint(), "fancollection/1/hidden_items");
}

#[test]
fn test_cached_items_follow_the_sequence_order() {
    let page: FanPageData = serde_json::from_value(json!({
        "fan_data": { "fan_id": 42 },
        "collection_data": {
            "sequence": ["b", "a", "missing"],
            "last_token": "tok1",
            "redownload_urls": {
                "p1": "https://bandcamp.com/download?id=1",
                "p2": "https://bandcamp.com/download?id=2",
            },
        },
        "item_cache": {
            "collection": {
                "a": {
                    "band_name": "Band A",
                    "item_title": "Album A",
                    "sale_item_id": 1,
                    "sale_item_type": "p",
                    "featured_track": 10,
                },
                "b": {
                    "band_name": "Band B",
                    "item_title": "Album B",
                    "sale_item_id": 2,
                    "sale_item_type": "p",
                    "featured_track": 20,
                },
            },
        },
    }))
    .unwrap();

    let items = page.cached_items(Partition::Collection);
    let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();

    // blob order, unknown cache keys skipped, nothing re-sorted
    assert_eq!(titles, ["Album B", "Album A"]);
}

#[test]
fn test_cached_items_filter_like_paginated_ones() {
    let page: FanPageData = serde_json::from_value(json!({
        "fan_data": { "fan_id": 42 },
        "hidden_data": {
            "sequence": ["a", "b"],
            "redownload_urls": { "p1": "https://bandcamp.com/download?id=1" },
        },
        "item_cache": {
            "hidden": {
                "a": {
                    "band_name": "Band A",
                    "item_title": "No Featured Track",
                    "sale_item_id": 3,
                    "sale_item_type": "p",
                    "featured_track": null,
                },
                "b": {
                    "band_name": "Band B",
                    "item_title": "Kept",
                    "sale_item_id": 1,
                    "sale_item_type": "p",
                    "featured_track": 1,
                },
            },
        },
    }))
    .unwrap();

    let items = page.cached_items(Partition::Hidden);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Kept");
}
