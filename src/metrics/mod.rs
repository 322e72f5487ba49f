pub mod aggregate;
pub mod dashboard;
pub mod present;
pub mod sort;

pub use aggregate::{aggregate, DashboardStats};
pub use dashboard::Dashboard;
pub use sort::{SortDirection, SortKey, SortState};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label substituted when an optional display field is absent.
pub const NA_LABEL: &str = "N/A";

/// One logged upstream API call, as returned by `GET /metricas`.
/// Field names follow the wire format; everything except the timestamp
/// is optional and degrades to a documented fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Route identifier of the logged call, e.g. "/pedido"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP verb — display-only, never aggregated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// HTTP status of the logged call; absent records are excluded
    /// from the status series but still counted in the totals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Wall time of the logged call in milliseconds
    #[serde(default)]
    pub response_time_ms: f64,

    /// ISO-8601 date-time; drives recency ordering and day bucketing
    #[serde(rename = "timestampISO")]
    pub timestamp_iso: String,

    /// Pre-computed "YYYY-MM-DD" group, overriding the timestamp prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_bucket: Option<String>,
}

impl MetricRecord {
    /// Endpoint for grouping purposes, with the missing-route fallback.
    pub fn endpoint_label(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(NA_LABEL)
    }

    /// Calendar-day string this record belongs to: the explicit bucket
    /// when present, otherwise the `YYYY-MM-DD` prefix of the timestamp.
    pub fn day(&self) -> Option<&str> {
        self.day_bucket
            .as_deref()
            .or_else(|| self.timestamp_iso.get(..10))
    }
}

/// The full request log for the current account: record-id → record.
///
/// JSON object key order carries no meaning, but a `BTreeMap` makes the
/// scan order stable across runs, so every first-occurrence series order
/// downstream is reproducible.
pub type MetricsCollection = BTreeMap<String, MetricRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_wire_names() {
        let json = r#"{
            "endpoint": "/pedido",
            "method": "POST",
            "statusCode": 201,
            "responseTimeMs": 42.5,
            "timestampISO": "2024-05-01T12:30:00Z",
            "dayBucket": "2024-05-01"
        }"#;
        let rec: MetricRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.endpoint.as_deref(), Some("/pedido"));
        assert_eq!(rec.status_code, Some(201));
        assert_eq!(rec.response_time_ms, 42.5);
        assert_eq!(rec.timestamp_iso, "2024-05-01T12:30:00Z");
        assert_eq!(rec.day_bucket.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn optional_fields_default() {
        let rec: MetricRecord =
            serde_json::from_str(r#"{"timestampISO": "2024-05-01T12:30:00Z"}"#).unwrap();
        assert_eq!(rec.endpoint, None);
        assert_eq!(rec.endpoint_label(), NA_LABEL);
        assert_eq!(rec.status_code, None);
        assert_eq!(rec.response_time_ms, 0.0);
        assert_eq!(rec.day(), Some("2024-05-01"));
    }

    #[test]
    fn day_bucket_overrides_timestamp_prefix() {
        let rec: MetricRecord = serde_json::from_str(
            r#"{"timestampISO": "2024-05-01T23:59:00Z", "dayBucket": "2024-05-02"}"#,
        )
        .unwrap();
        assert_eq!(rec.day(), Some("2024-05-02"));
    }

    #[test]
    fn day_is_none_for_truncated_timestamp() {
        let rec: MetricRecord = serde_json::from_str(r#"{"timestampISO": "2024"}"#).unwrap();
        assert_eq!(rec.day(), None);
    }
}
