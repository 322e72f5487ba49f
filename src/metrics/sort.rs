use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::MetricRecord;

// ─── Sort state ──────────────────────────────────────────────────

/// Column the detail table can be ordered by. Variants deserialize from
/// the record's wire field names, so a query string can name them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "endpoint")]
    Endpoint,
    #[serde(rename = "method")]
    Method,
    #[serde(rename = "statusCode")]
    StatusCode,
    #[serde(rename = "responseTimeMs")]
    ResponseTimeMs,
    #[serde(rename = "timestampISO")]
    Timestamp,
    #[serde(rename = "dayBucket")]
    DayBucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current ordering of the detail table.
///
/// `click` implements column-header semantics: clicking the active column
/// flips the direction, clicking a new column selects it descending (so
/// the first click on any column shows highest / most recent first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Newest records first, before any interaction.
    fn default() -> Self {
        Self {
            key: SortKey::Timestamp,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    pub fn click(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }
}

// ─── Sorting ─────────────────────────────────────────────────────

/// Order table rows in place by the state's key and direction.
///
/// The sort is stable and rows missing the compared field tie, so their
/// relative order is preserved; re-sorting an already-sorted slice with
/// the same state is a no-op.
pub fn sort_rows(rows: &mut [(String, MetricRecord)], state: &SortState) {
    rows.sort_by(|(_, a), (_, b)| {
        let ord = compare(a, b, state.key);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn compare(a: &MetricRecord, b: &MetricRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Endpoint => cmp_present(a.endpoint.as_deref(), b.endpoint.as_deref()),
        SortKey::Method => cmp_present(a.method.as_deref(), b.method.as_deref()),
        SortKey::StatusCode => cmp_present(a.status_code, b.status_code),
        SortKey::ResponseTimeMs => a
            .response_time_ms
            .partial_cmp(&b.response_time_ms)
            .unwrap_or(Ordering::Equal),
        // ISO-8601 timestamps compare correctly as strings
        SortKey::Timestamp => a.timestamp_iso.cmp(&b.timestamp_iso),
        SortKey::DayBucket => cmp_present(a.day_bucket.as_deref(), b.day_bucket.as_deref()),
    }
}

/// Natural ordering when both sides carry the field; a missing side ties.
fn cmp_present<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}
