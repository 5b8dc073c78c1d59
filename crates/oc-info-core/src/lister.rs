//! Registry root listing.

use serde_json::Value;
use tracing::debug;

use crate::client::RegistryClient;
use crate::error::{InfoError, InfoResult};
use crate::model::{RegistryDocument, REGISTRY_TYPE};
use crate::obs;

/// List the component hrefs published by the registry at `url`.
///
/// The hrefs are returned verbatim; malformed ones only fail once they are
/// fetched.
pub async fn list_components(client: &dyn RegistryClient, url: &str) -> InfoResult<Vec<String>> {
    let body = client.get_json(url).await.map_err(|e| {
        debug!(url = %url, error = %e, "registry listing request failed");
        InfoError::registry(url, e)
    })?;

    let document = parse_registry_document(url, body)?;
    obs::emit_registry_listed(url, document.components.len());
    Ok(document.components)
}

fn parse_registry_document(url: &str, body: Value) -> InfoResult<RegistryDocument> {
    if body.is_null() {
        return Err(InfoError::registry(url, "response body is empty"));
    }

    let document: RegistryDocument = serde_json::from_value(body)
        .map_err(|e| InfoError::registry(url, format!("not a registry document: {e}")))?;

    if !document.is_registry() {
        return Err(InfoError::registry(
            url,
            format!("type is '{}', expected '{REGISTRY_TYPE}'", document.kind),
        ));
    }

    Ok(document)
}
