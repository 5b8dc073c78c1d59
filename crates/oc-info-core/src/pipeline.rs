//! End-to-end inspection: list, fetch, aggregate.

use std::sync::Arc;

use tracing::debug;

use crate::aggregator::{aggregate, Aggregation};
use crate::client::RegistryClient;
use crate::error::InfoResult;
use crate::fetcher::fetch_all;
use crate::lister::list_components;
use crate::model::AggregationKey;
use crate::obs;

/// What to inspect and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectRequest {
    pub registry_url: String,
    pub key: AggregationKey,
    pub with_details: bool,
}

impl InspectRequest {
    pub fn new(registry_url: &str, key: AggregationKey) -> Self {
        Self {
            registry_url: registry_url.to_string(),
            key,
            with_details: false,
        }
    }

    pub fn with_details(mut self, with_details: bool) -> Self {
        self.with_details = with_details;
        self
    }
}

/// List the registry, fetch every component's metadata and aggregate it.
///
/// Any listing or fetch failure is returned before aggregation starts.
pub async fn inspect(
    client: Arc<dyn RegistryClient>,
    request: &InspectRequest,
) -> InfoResult<Aggregation> {
    let hrefs = list_components(client.as_ref(), &request.registry_url).await?;
    debug!(components = hrefs.len(), "fetching component info");

    let metadata = fetch_all(client, &hrefs).await?;

    let aggregation = aggregate(&metadata, request.key, request.with_details);
    obs::emit_aggregated(
        request.key,
        aggregation.active_count,
        aggregation.distinct_count(),
    );
    Ok(aggregation)
}
