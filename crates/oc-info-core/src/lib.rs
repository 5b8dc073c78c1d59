//! oc-info core library
//!
//! Inspects an OC component registry: lists the published components,
//! fetches every component's `~info` document concurrently and aggregates
//! authors, dependencies or plugins across the active set.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oc_info_core::{inspect, render, AggregationKey, ClientConfig, HttpRegistryClient, InspectRequest};
//!
//! let client = Arc::new(HttpRegistryClient::new(&ClientConfig::from_env())?);
//! let request = InspectRequest::new("https://registry.example.com/", AggregationKey::Authors);
//! let aggregation = inspect(client, &request).await?;
//! println!("{}", render(&aggregation));
//! ```

pub mod aggregator;
pub mod client;
pub mod error;
pub mod fakes;
pub mod fetcher;
pub mod lister;
pub mod model;
pub mod obs;
pub mod pipeline;
pub mod presenter;
pub mod telemetry;

pub use aggregator::{aggregate, Aggregation, ValueTally};
pub use client::{ClientConfig, HttpRegistryClient, RegistryClient, USER_AGENT_ENV};
pub use error::{ClientError, ClientResult, InfoError, InfoResult};
pub use fetcher::{fetch_all, info_url};
pub use lister::list_components;
pub use model::{
    AggregationKey, AuthorField, ComponentMetadata, RegistryDocument, DEPRECATED_STATE,
    REGISTRY_TYPE,
};
pub use pipeline::{inspect, InspectRequest};
pub use presenter::{headline, render, render_entries};
pub use telemetry::init_tracing;

/// oc-info version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
