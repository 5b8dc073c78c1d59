//! Concurrent component metadata retrieval.
//!
//! Every href is fetched at `<href>/~info` on its own task. The batch is
//! all-or-nothing: the first failure aborts the outstanding requests and no
//! partial result is returned.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use crate::client::RegistryClient;
use crate::error::{InfoError, InfoResult};
use crate::model::ComponentMetadata;
use crate::obs;

/// Path appended to a component href to reach its metadata.
pub const INFO_SUFFIX: &str = "/~info";

/// Metadata URL for a component href.
pub fn info_url(href: &str) -> String {
    format!("{href}{INFO_SUFFIX}")
}

/// Fetch metadata for every href concurrently.
///
/// Results are returned in the order of `hrefs`, whatever order the requests
/// complete in.
pub async fn fetch_all(
    client: Arc<dyn RegistryClient>,
    hrefs: &[String],
) -> InfoResult<Vec<ComponentMetadata>> {
    let started = Instant::now();
    let mut join_set = JoinSet::new();
    for (idx, href) in hrefs.iter().enumerate() {
        let client = Arc::clone(&client);
        let url = info_url(href);
        join_set.spawn(async move {
            let metadata = fetch_one(client.as_ref(), &url).await?;
            Ok::<(usize, ComponentMetadata), InfoError>((idx, metadata))
        });
    }

    let mut ordered: Vec<Option<ComponentMetadata>> = vec![None; hrefs.len()];
    while let Some(joined) = join_set.join_next().await {
        let result =
            joined.map_err(|e| InfoError::fetch("<task>", format!("task join error: {e}")))?;
        // Returning drops the JoinSet, which aborts the remaining requests.
        let (idx, metadata) = result.map_err(|e| {
            if let InfoError::Fetch { url, reason } = &e {
                obs::emit_fetch_failed(url, reason);
            }
            e
        })?;
        ordered[idx] = Some(metadata);
    }

    let metadata = hrefs
        .iter()
        .zip(ordered)
        .map(|(href, slot)| {
            slot.ok_or_else(|| InfoError::fetch(&info_url(href), "missing fetch result"))
        })
        .collect::<InfoResult<Vec<_>>>()?;

    obs::emit_metadata_fetched(metadata.len(), started.elapsed().as_millis() as u64);
    Ok(metadata)
}

async fn fetch_one(client: &dyn RegistryClient, url: &str) -> InfoResult<ComponentMetadata> {
    let body = client
        .get_json(url)
        .await
        .map_err(|e| InfoError::fetch(url, e))?;
    if !body.is_object() {
        return Err(InfoError::fetch(url, "component info is not a JSON object"));
    }
    serde_json::from_value(body)
        .map_err(|e| InfoError::fetch(url, format!("unexpected component info: {e}")))
}
