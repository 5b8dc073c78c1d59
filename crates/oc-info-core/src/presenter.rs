//! Human-readable rendering of an [`Aggregation`].
//!
//! ```text
//! Found 2 node.js dependencies for 3 active components:
//! * lodash (2)
//! 	* header@1.0.0
//! 	* footer@2.3.1
//! * moment (1)
//! 	* header@1.0.0
//! ```

use crate::aggregator::{Aggregation, ValueTally};

/// Header line: `Found <N> <label> for <active> active components:`.
pub fn headline(aggregation: &Aggregation) -> String {
    format!(
        "Found {} {} for {} active components:",
        aggregation.distinct_count(),
        aggregation.key.label(),
        aggregation.active_count
    )
}

/// One entry per distinct value, sorted ascending by value.
///
/// Contributor sub-lines are included only when the aggregation was built
/// with details.
pub fn render_entries(aggregation: &Aggregation) -> Vec<String> {
    let mut values: Vec<(&String, &ValueTally)> = aggregation.tallies.iter().collect();
    values.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    values
        .into_iter()
        .map(|(value, tally)| render_entry(value, tally, aggregation.with_details))
        .collect()
}

fn render_entry(value: &str, tally: &ValueTally, with_details: bool) -> String {
    let mut entry = format!("* {} ({})", value, tally.count);
    if with_details {
        for contributor in &tally.contributors {
            entry.push_str("\n\t* ");
            entry.push_str(contributor);
        }
    }
    entry
}

/// Full report text: headline followed by the entries, newline separated,
/// without a trailing newline.
pub fn render(aggregation: &Aggregation) -> String {
    std::iter::once(headline(aggregation))
        .chain(render_entries(aggregation))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use crate::model::{AggregationKey, ComponentMetadata};
    use serde_json::json;

    fn components(values: Vec<serde_json::Value>) -> Vec<ComponentMetadata> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).expect("valid metadata"))
            .collect()
    }

    #[test]
    fn test_single_author_report() {
        let metadata = components(vec![json!({
            "name": "a", "version": "1.0", "author": "Jane <jane@x.com>"
        })]);
        let agg = aggregate(&metadata, AggregationKey::Authors, false);
        assert_eq!(
            render(&agg),
            "Found 1 component authors for 1 active components:\n* Jane <jane@x.com> (1)"
        );
    }

    #[test]
    fn test_headline_labels_per_key() {
        let metadata = components(vec![json!({"name": "a", "version": "1", "author": "A"})]);
        let labels: Vec<String> = AggregationKey::ALL
            .into_iter()
            .map(|key| headline(&aggregate(&metadata, key, false)))
            .collect();
        assert_eq!(
            labels,
            vec![
                "Found 1 component authors for 1 active components:",
                "Found 0 node.js dependencies for 1 active components:",
                "Found 0 node.js plugins for 1 active components:",
            ]
        );
    }

    #[test]
    fn test_entries_sorted_by_byte_order() {
        let metadata = components(vec![json!({
            "name": "a", "version": "1", "author": "A",
            "plugins": ["zeta", "Zeta", "alpha", "_private", "alpha"]
        })]);
        let agg = aggregate(&metadata, AggregationKey::Plugins, false);
        assert_eq!(
            render_entries(&agg),
            vec!["* Zeta (1)", "* _private (1)", "* alpha (2)", "* zeta (1)"]
        );
    }

    #[test]
    fn test_details_list_contributors_in_input_order() {
        let metadata = components(vec![
            json!({"name": "web", "version": "1.2.0", "author": "A", "dependencies": {"lodash": "4"}}),
            json!({"name": "api", "version": "0.9.1", "author": "B", "dependencies": {"lodash": "3"}}),
        ]);
        let agg = aggregate(&metadata, AggregationKey::Dependencies, true);
        assert_eq!(
            render(&agg),
            "Found 1 node.js dependencies for 2 active components:\n\
             * lodash (2)\n\t* web@1.2.0\n\t* api@0.9.1"
        );
    }

    #[test]
    fn test_empty_report_is_headline_only() {
        let agg = aggregate(&[], AggregationKey::Plugins, true);
        assert_eq!(render(&agg), "Found 0 node.js plugins for 0 active components:");
        assert!(render_entries(&agg).is_empty());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let metadata = components(
            (0..20)
                .map(|i| {
                    json!({
                        "name": format!("c{i}"), "version": "1.0.0", "author": format!("Author {}", i % 7),
                        "plugins": [format!("p{}", i % 5), format!("p{}", i % 3)]
                    })
                })
                .collect(),
        );
        for key in AggregationKey::ALL {
            let agg = aggregate(&metadata, key, true);
            let first = render(&agg);
            assert_eq!(first, render(&agg));
            assert_eq!(first, render(&agg.clone()));
        }
    }
}
