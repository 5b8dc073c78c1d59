//! Structured observability hooks for the inspection pipeline.
//!
//! Each stage emits one event when it completes so a `--verbose` run shows
//! how far the pipeline got. Events go through `tracing`; see
//! [`crate::telemetry::init_tracing`] for the subscriber.

use tracing::{debug, info};

use crate::model::AggregationKey;

/// Emit event: registry root listed.
///
/// # Example
///
/// ```ignore
/// emit_registry_listed("https://registry.example.com/", 42);
/// // logs: event=registry.listed url=https://registry.example.com/ components=42
/// ```
pub fn emit_registry_listed(url: &str, components: usize) {
    info!(event = "registry.listed", url = %url, components = components);
}

/// Emit event: every component's metadata arrived.
pub fn emit_metadata_fetched(components: usize, duration_ms: u64) {
    info!(
        event = "metadata.fetched",
        components = components,
        duration_ms = duration_ms,
    );
}

/// Emit event: a metadata request failed and the batch was abandoned.
///
/// Logged at `debug`: the CLI reports the failure itself as an error line.
pub fn emit_fetch_failed(url: &str, error: &dyn std::fmt::Display) {
    debug!(event = "metadata.fetch_failed", url = %url, error = %error);
}

/// Emit event: aggregation finished.
pub fn emit_aggregated(key: AggregationKey, active_components: usize, distinct_values: usize) {
    info!(
        event = "aggregation.completed",
        key = %key,
        active_components = active_components,
        distinct_values = distinct_values,
    );
}
