use parking_lot::Mutex;

use super::aggregate;
use super::present::{self, DashboardReport, TableView};
use super::sort::{self, SortKey, SortState};
use super::{MetricRecord, MetricsCollection};

/// Holds the latest metrics snapshot and the detail-table ordering.
/// Handlers install snapshots, the report endpoints read derived views.
pub struct Dashboard {
    inner: Mutex<Inner>,
}

struct Inner {
    /// Immutable for the lifetime of one view; replaced wholesale on fetch.
    snapshot: Option<MetricsCollection>,
    sort: SortState,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                snapshot: None,
                sort: SortState::default(),
            }),
        }
    }

    /// Replace the current snapshot. The table ordering is kept so a
    /// re-fetch does not yank the view out from under the user.
    pub fn install(&self, collection: MetricsCollection) {
        self.inner.lock().snapshot = Some(collection);
    }

    /// Drop the snapshot and reset the table to its default ordering.
    /// Called on logout and when demo data is cleared.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.snapshot = None;
        inner.sort = SortState::default();
    }

    pub fn record_count(&self) -> usize {
        self.inner
            .lock()
            .snapshot
            .as_ref()
            .map_or(0, MetricsCollection::len)
    }

    /// Aggregate the snapshot into the display-ready report.
    /// `None` when nothing has been fetched or the account log is empty.
    pub fn report(&self) -> Option<DashboardReport> {
        let inner = self.inner.lock();
        let snapshot = inner.snapshot.as_ref()?;
        aggregate::aggregate(snapshot)
            .as_ref()
            .map(present::render_report)
    }

    /// Table rows under the current ordering. A `click` applies one
    /// column-header click before sorting; `None` re-reads the table
    /// as-is, which never reorders ties.
    pub fn rows(&self, click: Option<SortKey>) -> Option<TableView> {
        let mut inner = self.inner.lock();
        if let Some(key) = click {
            inner.sort.click(key);
        }

        let snapshot = inner.snapshot.as_ref()?;
        let mut rows: Vec<(String, MetricRecord)> = snapshot
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect();
        sort::sort_rows(&mut rows, &inner.sort);

        Some(TableView {
            sorted_by: inner.sort.key,
            direction: inner.sort.direction,
            rows: rows
                .into_iter()
                .map(|(id, record)| present::table_row(id, &record))
                .collect(),
        })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::sort::SortDirection;

    fn sample() -> MetricsCollection {
        let json = r#"{
            "a": {"endpoint": "/x", "statusCode": 200, "responseTimeMs": 10,
                  "timestampISO": "2024-01-01T00:00:00Z"},
            "b": {"endpoint": "/x", "statusCode": 500, "responseTimeMs": 30,
                  "timestampISO": "2024-01-02T00:00:00Z"}
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_dashboard_renders_nothing() {
        let dash = Dashboard::new();
        assert!(dash.report().is_none());
        assert!(dash.rows(None).is_none());
        assert_eq!(dash.record_count(), 0);
    }

    #[test]
    fn install_then_report() {
        let dash = Dashboard::new();
        dash.install(sample());

        let report = dash.report().unwrap();
        assert_eq!(report.summary.total_requests, 2);
        assert_eq!(report.summary.avg_response_time, "20.00 ms");
        assert_eq!(report.summary.error_rate, "50.00%");
    }

    #[test]
    fn default_rows_are_newest_first() {
        let dash = Dashboard::new();
        dash.install(sample());

        let view = dash.rows(None).unwrap();
        assert_eq!(view.sorted_by, SortKey::Timestamp);
        assert_eq!(view.direction, SortDirection::Descending);
        assert_eq!(view.rows[0].id, "b");
        assert_eq!(view.rows[1].id, "a");
    }

    #[test]
    fn clicks_toggle_through_the_engine() {
        let dash = Dashboard::new();
        dash.install(sample());

        // new column: descending — 500 before 200
        let view = dash.rows(Some(SortKey::StatusCode)).unwrap();
        assert_eq!(view.direction, SortDirection::Descending);
        assert_eq!(view.rows[0].id, "b");

        // same column again: flipped
        let view = dash.rows(Some(SortKey::StatusCode)).unwrap();
        assert_eq!(view.direction, SortDirection::Ascending);
        assert_eq!(view.rows[0].id, "a");

        // plain reads keep the chosen ordering
        let view = dash.rows(None).unwrap();
        assert_eq!(view.direction, SortDirection::Ascending);
        assert_eq!(view.rows[0].id, "a");
    }

    #[test]
    fn sort_survives_reinstall_but_not_clear() {
        let dash = Dashboard::new();
        dash.install(sample());
        dash.rows(Some(SortKey::StatusCode));

        dash.install(sample());
        let view = dash.rows(None).unwrap();
        assert_eq!(view.sorted_by, SortKey::StatusCode);

        dash.clear();
        assert!(dash.rows(None).is_none());
        dash.install(sample());
        let view = dash.rows(None).unwrap();
        assert_eq!(view.sorted_by, SortKey::Timestamp);
    }
}
