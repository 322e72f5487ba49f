use serde::Serialize;

use super::aggregate::{DashboardStats, DayPoint};
use super::sort::{SortDirection, SortKey};
use super::{MetricRecord, NA_LABEL};

// ─── Colors ──────────────────────────────────────────────────────

/// Palette cycled by index for categorical slices.
pub const SERIES_PALETTE: &[&str] = &["#6366f1", "#818cf8", "#a5b4fc", "#c7d2fe"];

/// Fixed colors for the well-known status groups.
const STATUS_COLORS: &[(&str, &str)] = &[
    ("2xx", "#22c55e"),
    ("4xx", "#f97316"),
    ("5xx", "#ef4444"),
];

/// Palette color for the slice at `index`. Never out of range.
pub fn palette_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Fixed color for a known status group, palette fallback otherwise.
pub fn status_color(group: &str, index: usize) -> &'static str {
    STATUS_COLORS
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, color)| *color)
        .unwrap_or_else(|| palette_color(index))
}

// ─── Formatting ──────────────────────────────────────────────────

/// "12.34%" — two decimals, percent suffix.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// "12.34 ms" — two decimals, millisecond suffix.
pub fn format_millis(value: f64) -> String {
    format!("{value:.2} ms")
}

/// Row styling class derived from an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Severe,
    Warning,
    Success,
    Neutral,
}

impl Severity {
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(s) if s >= 500 => Self::Severe,
            Some(s) if s >= 400 => Self::Warning,
            Some(s) if s >= 200 => Self::Success,
            _ => Self::Neutral,
        }
    }
}

// ─── Display-ready shapes ────────────────────────────────────────

/// The three stat cards across the top of the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub total_requests: u64,
    pub avg_response_time: String,
    pub error_rate: String,
}

/// Categorical chart slice with its assigned color.
#[derive(Debug, Clone, Serialize)]
pub struct ColoredPoint {
    pub name: String,
    pub value: u64,
    pub color: &'static str,
}

/// Per-endpoint mean latency bar (numeric for the axis, label for the tip).
#[derive(Debug, Clone, Serialize)]
pub struct LatencyBar {
    pub name: String,
    pub value: f64,
    pub label: String,
}

/// Everything the shell needs to render the dashboard, pre-formatted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: SummaryCards,
    pub requests_by_endpoint: Vec<ColoredPoint>,
    pub requests_by_status: Vec<ColoredPoint>,
    pub avg_response_time_by_endpoint: Vec<LatencyBar>,
    pub requests_over_time: Vec<DayPoint>,
}

/// Map aggregated stats onto renderable shapes. Pure formatting and color
/// lookup — no computation happens here.
pub fn render_report(stats: &DashboardStats) -> DashboardReport {
    DashboardReport {
        summary: SummaryCards {
            total_requests: stats.total_requests,
            avg_response_time: format_millis(stats.avg_response_time_ms),
            error_rate: format_percent(stats.error_rate_pct),
        },
        requests_by_endpoint: stats
            .requests_by_endpoint
            .iter()
            .enumerate()
            .map(|(i, p)| ColoredPoint {
                name: p.name.clone(),
                value: p.value,
                color: palette_color(i),
            })
            .collect(),
        requests_by_status: stats
            .requests_by_status
            .iter()
            .enumerate()
            .map(|(i, p)| ColoredPoint {
                name: p.name.clone(),
                value: p.value,
                color: status_color(&p.name, i),
            })
            .collect(),
        avg_response_time_by_endpoint: stats
            .avg_response_time_by_endpoint
            .iter()
            .map(|p| LatencyBar {
                name: p.name.clone(),
                value: p.value,
                label: format_millis(p.value),
            })
            .collect(),
        requests_over_time: stats.requests_over_time.clone(),
    }
}

// ─── Table rows ──────────────────────────────────────────────────

/// One detail-table row, display-ready.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: String,
    pub endpoint: String,
    pub method: String,
    pub status_code: Option<u16>,
    pub severity: Severity,
    pub response_time: String,
    pub timestamp: String,
}

/// The sorted detail table plus the ordering it was produced under.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub sorted_by: SortKey,
    pub direction: SortDirection,
    pub rows: Vec<TableRow>,
}

pub fn table_row(id: String, record: &MetricRecord) -> TableRow {
    TableRow {
        id,
        endpoint: record.endpoint_label().to_owned(),
        method: record
            .method
            .clone()
            .unwrap_or_else(|| NA_LABEL.to_owned()),
        status_code: record.status_code,
        severity: Severity::from_status(record.status_code),
        response_time: format_millis(record.response_time_ms),
        timestamp: record.timestamp_iso.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregate::{CountPoint, LatencyPoint};

    #[test]
    fn formats_two_decimals_with_suffixes() {
        assert_eq!(format_percent(50.0), "50.00%");
        assert_eq!(format_percent(0.125), "0.13%");
        assert_eq!(format_millis(20.0), "20.00 ms");
        assert_eq!(format_millis(1234.5678), "1234.57 ms");
    }

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(palette_color(0), "#6366f1");
        assert_eq!(palette_color(3), "#c7d2fe");
        assert_eq!(palette_color(4), palette_color(0));
        assert_eq!(palette_color(102), palette_color(2));
    }

    #[test]
    fn known_status_groups_get_fixed_colors() {
        assert_eq!(status_color("2xx", 3), "#22c55e");
        assert_eq!(status_color("4xx", 0), "#f97316");
        assert_eq!(status_color("5xx", 1), "#ef4444");
        // anything else cycles the palette
        assert_eq!(status_color("3xx", 1), palette_color(1));
        assert_eq!(status_color("garbage", 0), palette_color(0));
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(Severity::from_status(Some(503)), Severity::Severe);
        assert_eq!(Severity::from_status(Some(500)), Severity::Severe);
        assert_eq!(Severity::from_status(Some(404)), Severity::Warning);
        assert_eq!(Severity::from_status(Some(301)), Severity::Success);
        assert_eq!(Severity::from_status(Some(200)), Severity::Success);
        assert_eq!(Severity::from_status(Some(101)), Severity::Neutral);
        assert_eq!(Severity::from_status(None), Severity::Neutral);
    }

    #[test]
    fn report_is_pure_formatting() {
        let stats = DashboardStats {
            total_requests: 2,
            avg_response_time_ms: 20.0,
            error_rate_pct: 50.0,
            requests_by_endpoint: vec![CountPoint { name: "/x".into(), value: 2 }],
            requests_by_status: vec![
                CountPoint { name: "2xx".into(), value: 1 },
                CountPoint { name: "5xx".into(), value: 1 },
            ],
            avg_response_time_by_endpoint: vec![LatencyPoint { name: "/x".into(), value: 20.0 }],
            requests_over_time: vec![DayPoint { day: "2024-01-01".into(), count: 2 }],
        };
        let report = render_report(&stats);

        assert_eq!(report.summary.total_requests, 2);
        assert_eq!(report.summary.avg_response_time, "20.00 ms");
        assert_eq!(report.summary.error_rate, "50.00%");
        assert_eq!(report.requests_by_endpoint[0].color, "#6366f1");
        assert_eq!(report.requests_by_status[0].color, "#22c55e");
        assert_eq!(report.requests_by_status[1].color, "#ef4444");
        assert_eq!(report.avg_response_time_by_endpoint[0].label, "20.00 ms");
    }

    #[test]
    fn table_row_falls_back_on_missing_fields() {
        let record = MetricRecord {
            endpoint: None,
            method: None,
            status_code: None,
            response_time_ms: 7.5,
            timestamp_iso: "2024-01-01T00:00:00Z".into(),
            day_bucket: None,
        };
        let row = table_row("r1".into(), &record);
        assert_eq!(row.endpoint, "N/A");
        assert_eq!(row.method, "N/A");
        assert_eq!(row.status_code, None);
        assert_eq!(row.severity, Severity::Neutral);
        assert_eq!(row.response_time, "7.50 ms");
    }
}
