//! Grouping and counting of metadata values across the active component set.
//!
//! [`aggregate`] is a pure fold over the fetched metadata: no I/O, no shared
//! state. Iteration order of the resulting tallies is unspecified; the
//! presenter sorts them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{AggregationKey, ComponentMetadata};

/// Count and contributors for one distinct value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueTally {
    pub count: usize,
    /// `name@version` of each contributing component, in first-seen order.
    /// Empty unless details were requested.
    pub contributors: Vec<String>,
}

/// Aggregated values for one [`AggregationKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub key: AggregationKey,
    pub with_details: bool,
    /// Non-deprecated components that carry an author.
    pub active_count: usize,
    pub tallies: HashMap<String, ValueTally>,
}

impl Aggregation {
    pub fn new(key: AggregationKey, with_details: bool) -> Self {
        Self {
            key,
            with_details,
            active_count: 0,
            tallies: HashMap::new(),
        }
    }

    /// Number of distinct values.
    pub fn distinct_count(&self) -> usize {
        self.tallies.len()
    }

    /// Tally for `value`, if any active component contributed it.
    pub fn tally(&self, value: &str) -> Option<&ValueTally> {
        self.tallies.get(value)
    }

    /// Fold one component into the accumulator.
    pub fn absorb(mut self, metadata: &ComponentMetadata) -> Self {
        if !metadata.is_active() {
            return self;
        }
        self.active_count += 1;

        let values = metadata.values_for(self.key);
        let descriptor = self.with_details.then(|| metadata.descriptor());
        for value in values {
            let tally = self.tallies.entry(value).or_default();
            tally.count += 1;
            if let Some(descriptor) = &descriptor {
                tally.contributors.push(descriptor.clone());
            }
        }
        self
    }
}

/// Aggregate `metadata` by `key`.
///
/// Deprecated components and components without an author are skipped for
/// every key, including `dependencies` and `plugins`.
pub fn aggregate(
    metadata: &[ComponentMetadata],
    key: AggregationKey,
    with_details: bool,
) -> Aggregation {
    metadata
        .iter()
        .fold(Aggregation::new(key, with_details), Aggregation::absorb)
}
