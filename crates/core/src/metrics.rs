//! Metrics definitions for the API.
//!
//! This module defines all metrics used throughout Atrium.
//! Metrics are collected using the `metrics` crate and can be exported
//! to Prometheus via `metrics-exporter-prometheus`.

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "connection_queries_total",
        "Total number of connection pages computed"
    );
    describe_histogram!(
        "connection_page_size",
        "Number of nodes returned per connection page"
    );
    describe_counter!(
        "invalid_cursors_total",
        "Total number of rejected after/before cursors"
    );
    describe_counter!(
        "avatar_resolutions_total",
        "Total number of avatars resolved"
    );
}

/// Record a computed connection page.
///
/// # Arguments
/// * `collection` - Cursor tag of the collection ("script" or "stylesheet")
/// * `size` - Number of nodes in the page
pub fn record_connection_page(collection: &str, size: usize) {
    counter!("connection_queries_total", "collection" => collection.to_string()).increment(1);
    histogram!("connection_page_size", "collection" => collection.to_string()).record(size as f64);
}

/// Record a rejected cursor.
pub fn record_invalid_cursor(collection: &str) {
    counter!("invalid_cursors_total", "collection" => collection.to_string()).increment(1);
}

/// Record an avatar resolution.
///
/// # Arguments
/// * `found` - Whether the provider found an avatar for the user
pub fn record_avatar_resolution(found: bool) {
    counter!("avatar_resolutions_total", "found" => found.to_string()).increment(1);
}
