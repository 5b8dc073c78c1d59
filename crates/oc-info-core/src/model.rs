//! Wire model for the OC registry HTTP contract.
//!
//! - [`RegistryDocument`] is the body of `GET <registry-url>`.
//! - [`ComponentMetadata`] is the body of `GET <href>/~info`.
//! - [`AggregationKey`] selects which attribute of the metadata is summarised.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InfoError;

/// `type` value every registry root document must carry.
pub const REGISTRY_TYPE: &str = "oc-registry";

/// Lifecycle state that marks a component inactive.
pub const DEPRECATED_STATE: &str = "deprecated";

/// Body of the registry root listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub components: Vec<String>,
}

impl RegistryDocument {
    pub fn is_registry(&self) -> bool {
        self.kind == REGISTRY_TYPE
    }
}

/// Registry-specific section of the component info document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcSection {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub state: Option<String>,
}

/// Metadata of one published component version.
///
/// Fields decode leniently: a value of an unexpected JSON type is treated as
/// absent instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient::author")]
    pub author: Option<AuthorField>,
    #[serde(default, deserialize_with = "lenient::mapping")]
    pub dependencies: Option<BTreeMap<String, Value>>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::oc_section")]
    pub oc: Option<OcSection>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub plugins: Option<Vec<String>>,
}

/// Field decoders that never reject a value because of its JSON type.
mod lenient {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{AuthorField, OcSection};

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar(Value::deserialize(d)?))
    }

    /// Strings become [`AuthorField::Text`], objects [`AuthorField::Structured`];
    /// anything else is no author.
    pub fn author<'de, D: Deserializer<'de>>(d: D) -> Result<Option<AuthorField>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(text) => Some(AuthorField::Text(text)),
            Value::Object(mut record) => Some(AuthorField::Structured {
                name: record.remove("name").and_then(scalar).unwrap_or_default(),
                email: record.remove("email").and_then(scalar),
            }),
            _ => None,
        })
    }

    pub fn mapping<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<BTreeMap<String, Value>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        })
    }

    /// Non-scalar entries are dropped.
    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => Some(items.into_iter().filter_map(scalar).collect()),
            _ => None,
        })
    }

    pub fn oc_section<'de, D: Deserializer<'de>>(d: D) -> Result<Option<OcSection>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(mut section) => Some(OcSection {
                state: section.remove("state").and_then(scalar),
            }),
            _ => None,
        })
    }
}

impl ComponentMetadata {
    /// `true` when either the top-level `state` or `oc.state` is `deprecated`.
    pub fn is_deprecated(&self) -> bool {
        let nested = self.oc.as_ref().and_then(|oc| oc.state.as_deref());
        [self.state.as_deref(), nested]
            .into_iter()
            .flatten()
            .any(|state| state == DEPRECATED_STATE)
    }

    /// Normalized author, or `None` when the field is absent or blank.
    pub fn author_display(&self) -> Option<String> {
        self.author
            .as_ref()
            .filter(|author| !author.is_blank())
            .map(AuthorField::display)
    }

    /// Deprecated components and components without an author are skipped
    /// by every aggregation.
    pub fn is_active(&self) -> bool {
        !self.is_deprecated() && self.author_display().is_some()
    }

    /// `name@version`, used to identify a contributor in detailed reports.
    pub fn descriptor(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Values this component contributes for `key`.
    pub fn values_for(&self, key: AggregationKey) -> Vec<String> {
        match key {
            AggregationKey::Authors => self.author_display().into_iter().collect(),
            AggregationKey::Dependencies => self
                .dependencies
                .as_ref()
                .map(|deps| deps.keys().cloned().collect())
                .unwrap_or_default(),
            AggregationKey::Plugins => self.plugins.clone().unwrap_or_default(),
        }
    }
}

/// The `author` field, either `"Name <email> (url)"` text or a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    Text(String),
    Structured {
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: Option<String>,
    },
}

impl AuthorField {
    fn is_blank(&self) -> bool {
        match self {
            AuthorField::Text(text) => text.trim().is_empty(),
            AuthorField::Structured { name, email } => {
                name.trim().is_empty() && email.as_deref().map_or(true, |e| e.trim().is_empty())
            }
        }
    }

    /// Canonical display string: `name` or `name <email>`.
    pub fn display(&self) -> String {
        match self {
            AuthorField::Text(text) => {
                let (name, email) = parse_author_text(text);
                join_name_email(&name, email.as_deref())
            }
            AuthorField::Structured { name, email } => join_name_email(name, email.as_deref()),
        }
    }
}

fn join_name_email(name: &str, email: Option<&str>) -> String {
    let name = name.trim();
    match email.map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) if name.is_empty() => format!("<{email}>"),
        Some(email) => format!("{name} <{email}>"),
        None => name.to_string(),
    }
}

fn author_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^([^<(]+?)?[ \t]*(?:<([^>(]+?)>)?[ \t]*(?:\(([^)]+?)\)|$)").ok()
        })
        .as_ref()
}

/// Split `Name <email> (url)` into name and email. Text that does not follow
/// the convention is kept whole as the name.
fn parse_author_text(text: &str) -> (String, Option<String>) {
    let text = text.trim();
    match author_pattern().and_then(|pattern| pattern.captures(text)) {
        Some(caps) => {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let email = caps.get(2).map(|m| m.as_str().to_string());
            (name.to_string(), email)
        }
        None => (text.to_string(), None),
    }
}

/// Attribute of [`ComponentMetadata`] a report summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKey {
    Authors,
    Dependencies,
    Plugins,
}

impl AggregationKey {
    pub const ALL: [AggregationKey; 3] = [
        AggregationKey::Authors,
        AggregationKey::Dependencies,
        AggregationKey::Plugins,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AggregationKey::Authors => "authors",
            AggregationKey::Dependencies => "dependencies",
            AggregationKey::Plugins => "plugins",
        }
    }

    /// Phrase used in the report header.
    pub fn label(self) -> &'static str {
        match self {
            AggregationKey::Authors => "component authors",
            AggregationKey::Dependencies => "node.js dependencies",
            AggregationKey::Plugins => "node.js plugins",
        }
    }
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationKey {
    type Err = InfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregationKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| InfoError::Usage(format!("option {s} is not valid")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> ComponentMetadata {
        serde_json::from_value(value).expect("valid metadata")
    }

    #[test]
    fn test_registry_document_sentinel() {
        let doc: RegistryDocument =
            serde_json::from_value(json!({"type": "oc-registry", "components": ["http://r/a"]}))
                .unwrap();
        assert!(doc.is_registry());
        assert_eq!(doc.components, vec!["http://r/a".to_string()]);

        let other: RegistryDocument = serde_json::from_value(json!({"type": "npm"})).unwrap();
        assert!(!other.is_registry());
        assert!(other.components.is_empty());
    }

    #[test]
    fn test_text_author_with_email() {
        let author = AuthorField::Text("Jane <jane@x.com>".to_string());
        assert_eq!(author.display(), "Jane <jane@x.com>");
    }

    #[test]
    fn test_text_author_drops_url() {
        let author = AuthorField::Text("Jane Doe <jane@x.com> (https://jane.dev)".to_string());
        assert_eq!(author.display(), "Jane Doe <jane@x.com>");

        let author = AuthorField::Text("Jane Doe (https://jane.dev)".to_string());
        assert_eq!(author.display(), "Jane Doe");
    }

    #[test]
    fn test_text_author_name_only_is_trimmed() {
        let author = AuthorField::Text("  Jane  ".to_string());
        assert_eq!(author.display(), "Jane");
    }

    #[test]
    fn test_structured_author_without_email_has_no_brackets() {
        let m = metadata(json!({"name": "b", "version": "1.0.0", "author": {"name": "Bob"}}));
        assert_eq!(m.author_display().as_deref(), Some("Bob"));
    }

    #[test]
    fn test_structured_author_with_email_and_url() {
        let m = metadata(json!({
            "name": "b",
            "version": "1.0.0",
            "author": {"name": "Bob", "email": "bob@x.com", "url": "https://bob.dev"}
        }));
        assert_eq!(m.author_display().as_deref(), Some("Bob <bob@x.com>"));
    }

    #[test]
    fn test_blank_or_null_author_is_absent() {
        let blank = metadata(json!({"name": "c", "version": "1", "author": "  "}));
        assert_eq!(blank.author_display(), None);
        assert!(!blank.is_active());

        let null = metadata(json!({"name": "c", "version": "1", "author": null}));
        assert_eq!(null.author, None);
        assert!(!null.is_active());
    }

    #[test]
    fn test_deprecated_state_top_level_and_nested() {
        let top = metadata(json!({"name": "a", "version": "1", "author": "A", "state": "deprecated"}));
        assert!(top.is_deprecated());

        let nested = metadata(json!({
            "name": "a", "version": "1", "author": "A", "oc": {"state": "deprecated"}
        }));
        assert!(nested.is_deprecated());
        assert!(!nested.is_active());

        let active = metadata(json!({
            "name": "a", "version": "1", "author": "A", "oc": {"state": "active"}
        }));
        assert!(!active.is_deprecated());
        assert!(active.is_active());
    }

    #[test]
    fn test_values_for_each_key() {
        let m = metadata(json!({
            "name": "header",
            "version": "2.1.0",
            "author": "Jane <jane@x.com>",
            "dependencies": {"lodash": "^4.0.0", "moment": "2.x"},
            "plugins": ["getUser", "getUser"]
        }));
        assert_eq!(m.values_for(AggregationKey::Authors), vec!["Jane <jane@x.com>"]);
        assert_eq!(m.values_for(AggregationKey::Dependencies), vec!["lodash", "moment"]);
        assert_eq!(m.values_for(AggregationKey::Plugins), vec!["getUser", "getUser"]);
        assert_eq!(m.descriptor(), "header@2.1.0");
    }

    #[test]
    fn test_missing_fields_yield_no_values() {
        let m = metadata(json!({"name": "bare", "version": "0.0.1", "author": "A"}));
        assert!(m.values_for(AggregationKey::Dependencies).is_empty());
        assert!(m.values_for(AggregationKey::Plugins).is_empty());
    }

    #[test]
    fn test_unexpected_field_types_are_treated_as_absent() {
        let m = metadata(json!({
            "name": null,
            "version": 3,
            "author": 42,
            "dependencies": ["lodash"],
            "state": {"value": "deprecated"},
            "oc": "deprecated",
            "plugins": "getUser"
        }));
        assert_eq!(m.name, "");
        assert_eq!(m.version, "3");
        assert_eq!(m.author, None);
        assert!(!m.is_deprecated());
        assert!(m.values_for(AggregationKey::Dependencies).is_empty());
        assert!(m.values_for(AggregationKey::Plugins).is_empty());
    }

    #[test]
    fn test_odd_author_record_and_plugin_entries() {
        let m = metadata(json!({
            "name": "odd",
            "version": "1.0.0",
            "author": {"name": ["Jane"], "email": "jane@x.com"},
            "plugins": ["log", null, {"name": "x"}, 7]
        }));
        assert_eq!(m.author_display().as_deref(), Some("<jane@x.com>"));
        assert_eq!(m.values_for(AggregationKey::Plugins), vec!["log", "7"]);
    }

    #[test]
    fn test_aggregation_key_parsing() {
        assert_eq!("authors".parse::<AggregationKey>().unwrap(), AggregationKey::Authors);
        assert_eq!(
            "dependencies".parse::<AggregationKey>().unwrap(),
            AggregationKey::Dependencies
        );
        assert_eq!("plugins".parse::<AggregationKey>().unwrap(), AggregationKey::Plugins);

        let err = "Authors".parse::<AggregationKey>().unwrap_err();
        assert!(matches!(err, InfoError::Usage(_)));
        assert_eq!(err.to_string(), "option Authors is not valid");
    }
}
