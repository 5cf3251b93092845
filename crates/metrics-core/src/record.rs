//! Metric records and bulk-ingest action lines.
//!
//! A [`MetricRecord`] is the document body written to the bulk stream. Its
//! resource association comes in two shapes, selected by
//! [`AssociationMode`](crate::AssociationMode):
//!
//! ```text
//! multi_metadata:  {"metric_type", "user_id", "timestamp", "metadata": [{..}, ..], "value"}
//! single_resource: {"metric_type", "user_id", "timestamp", "resource_type", "resource_id", "value"}
//! ```
//!
//! Each document is preceded by a [`BulkAction`] line such as
//! `{"index":{"_id":0}}`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used for record timestamps (local time, microsecond precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One resource a record is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub resource_type: String,
    pub resource_id: String,
}

impl ResourceRef {
    pub fn new(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }
}

/// Resource association of a record, flattened into the record body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceAssociation {
    /// `"metadata": [{"resource_type": .., "resource_id": ..}, ..]`
    Metadata { metadata: Vec<ResourceRef> },
    /// `"resource_type": .., "resource_id": ..`
    Single(ResourceRef),
}

impl ResourceAssociation {
    /// All associated resources, in output order.
    pub fn refs(&self) -> &[ResourceRef] {
        match self {
            ResourceAssociation::Metadata { metadata } => metadata,
            ResourceAssociation::Single(resource) => std::slice::from_ref(resource),
        }
    }
}

/// A single synthetic metric measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub metric_type: String,
    pub user_id: String,
    #[serde(with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(flatten)]
    pub resources: ResourceAssociation,
    pub value: i64,
}

impl MetricRecord {
    /// Resource types this record is associated with.
    pub fn resource_types(&self) -> Vec<&str> {
        self.resources
            .refs()
            .iter()
            .map(|r| r.resource_type.as_str())
            .collect()
    }
}

mod iso_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").map_err(serde::de::Error::custom)
    }
}

/// Action keyword of a bulk-ingest action line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkActionKind {
    /// Create or replace the document
    #[default]
    Index,
    /// Create the document, failing if the id exists
    Create,
}

/// Target of a bulk action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "_id")]
    pub id: u64,
}

/// A bulk-ingest action line, e.g. `{"index":{"_id":0}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Index(ActionTarget),
    Create(ActionTarget),
}

impl BulkAction {
    pub fn new(kind: BulkActionKind, id: u64, index: Option<String>) -> Self {
        let target = ActionTarget { index, id };
        match kind {
            BulkActionKind::Index => BulkAction::Index(target),
            BulkActionKind::Create => BulkAction::Create(target),
        }
    }

    pub fn target(&self) -> &ActionTarget {
        match self {
            BulkAction::Index(target) | BulkAction::Create(target) => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(14, 5, 7, 250_000)
            .unwrap()
    }

    #[test]
    fn test_single_resource_shape() {
        let record = MetricRecord {
            metric_type: "time".to_string(),
            user_id: "u1".to_string(),
            timestamp: sample_timestamp(),
            resources: ResourceAssociation::Single(ResourceRef::new("segment", "s1")),
            value: 4200,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"metric_type":"time","user_id":"u1","timestamp":"2024-03-09T14:05:07.250000","resource_type":"segment","resource_id":"s1","value":4200}"#
        );

        let parsed: MetricRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_multi_metadata_shape() {
        let record = MetricRecord {
            metric_type: "jump_height".to_string(),
            user_id: "u2".to_string(),
            timestamp: sample_timestamp(),
            resources: ResourceAssociation::Metadata {
                metadata: vec![
                    ResourceRef::new("activity", "a1"),
                    ResourceRef::new("segment", "s1"),
                ],
            },
            value: 120,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"metric_type":"jump_height","user_id":"u2","timestamp":"2024-03-09T14:05:07.250000","metadata":[{"resource_type":"activity","resource_id":"a1"},{"resource_type":"segment","resource_id":"s1"}],"value":120}"#
        );

        let parsed: MetricRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.resource_types(), vec!["activity", "segment"]);
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_timestamp_without_fraction_parses() {
        let json = r#"{"metric_type":"time","user_id":"u1","timestamp":"2024-03-09T14:05:07","resource_type":"segment","resource_id":"s1","value":1}"#;
        let parsed: MetricRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.timestamp,
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 7)
                .unwrap()
        );
    }

    #[test]
    fn test_bulk_action_lines() {
        let action = BulkAction::new(BulkActionKind::Index, 0, None);
        assert_eq!(
            serde_json::to_string(&action).unwrap(),
            r#"{"index":{"_id":0}}"#
        );

        let action = BulkAction::new(BulkActionKind::Create, 17, Some("metrics".to_string()));
        assert_eq!(
            serde_json::to_string(&action).unwrap(),
            r#"{"create":{"_index":"metrics","_id":17}}"#
        );

        let parsed: BulkAction = serde_json::from_str(r#"{"index":{"_id":5}}"#).unwrap();
        assert_eq!(parsed.target().id, 5);
        assert_eq!(parsed.target().index, None);
    }
}
