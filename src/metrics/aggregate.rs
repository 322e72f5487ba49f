use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{MetricRecord, MetricsCollection};

// ─── Series types ────────────────────────────────────────────────

/// One slice of a categorical chart: a label and how many records bear it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountPoint {
    pub name: String,
    pub value: u64,
}

/// Per-group mean latency in milliseconds, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyPoint {
    pub name: String,
    pub value: f64,
}

/// One calendar day on the requests-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoint {
    pub day: String,
    pub count: u64,
}

/// Everything the dashboard derives from one metrics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_requests: u64,
    /// Arithmetic mean over every record, milliseconds
    pub avg_response_time_ms: f64,
    /// Share of records with status >= 400, as 0–100
    pub error_rate_pct: f64,
    pub requests_by_endpoint: Vec<CountPoint>,
    pub requests_by_status: Vec<CountPoint>,
    pub avg_response_time_by_endpoint: Vec<LatencyPoint>,
    pub requests_over_time: Vec<DayPoint>,
}

// ─── Aggregation ─────────────────────────────────────────────────

/// Collapse a metrics snapshot into the dashboard's summary numbers and
/// chart series. Returns `None` for an empty snapshot so callers suppress
/// rendering instead of averaging zero records.
///
/// The input is never mutated; every series is a fresh allocation.
/// Categorical series keep first-occurrence order of the scan, the time
/// series alone is sorted by calendar date.
pub fn aggregate(collection: &MetricsCollection) -> Option<DashboardStats> {
    let records: Vec<&MetricRecord> = collection.values().collect();
    if records.is_empty() {
        return None;
    }

    let total_requests = records.len() as u64;

    let sum_ms: f64 = records.iter().map(|r| r.response_time_ms).sum();
    let avg_response_time_ms = sum_ms / total_requests as f64;

    let error_count = records
        .iter()
        .filter(|r| matches!(r.status_code, Some(s) if s >= 400))
        .count() as u64;
    let error_rate_pct = 100.0 * error_count as f64 / total_requests as f64;

    Some(DashboardStats {
        total_requests,
        avg_response_time_ms,
        error_rate_pct,
        requests_by_endpoint: count_by(&records, |r| Some(r.endpoint_label().to_owned())),
        requests_by_status: count_by(&records, |r| r.status_code.map(status_group)),
        avg_response_time_by_endpoint: latency_by_endpoint(&records),
        requests_over_time: requests_over_time(&records),
    })
}

/// "2xx" / "4xx" / "5xx" — whatever the hundreds digit says.
fn status_group(status: u16) -> String {
    format!("{}xx", status / 100)
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count records per label, keeping first-occurrence order. Records for
/// which `label` yields `None` are skipped.
fn count_by<F>(records: &[&MetricRecord], label: F) -> Vec<CountPoint>
where
    F: Fn(&MetricRecord) -> Option<String>,
{
    let mut points: Vec<CountPoint> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(name) = label(record) else { continue };
        match index.get(&name) {
            Some(&i) => points[i].value += 1,
            None => {
                index.insert(name.clone(), points.len());
                points.push(CountPoint { name, value: 1 });
            }
        }
    }

    points
}

fn latency_by_endpoint(records: &[&MetricRecord]) -> Vec<LatencyPoint> {
    // (sum, count) per endpoint, first-occurrence order
    let mut sums: Vec<(String, f64, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let name = record.endpoint_label();
        match index.get(name) {
            Some(&i) => {
                sums[i].1 += record.response_time_ms;
                sums[i].2 += 1;
            }
            None => {
                index.insert(name.to_owned(), sums.len());
                sums.push((name.to_owned(), record.response_time_ms, 1));
            }
        }
    }

    sums.into_iter()
        .map(|(name, sum, count)| LatencyPoint {
            name,
            value: round2(sum / count as f64),
        })
        .collect()
}

/// Daily request counts, ascending by calendar date. Records whose day
/// string is not a real `YYYY-MM-DD` date are dropped from this series
/// only — they still count everywhere else.
fn requests_over_time(records: &[&MetricRecord]) -> Vec<DayPoint> {
    let mut by_day: std::collections::BTreeMap<NaiveDate, DayPoint> =
        std::collections::BTreeMap::new();

    for record in records {
        let Some(day) = record.day() else { continue };
        let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") else {
            continue;
        };
        by_day
            .entry(date)
            .and_modify(|p| p.count += 1)
            .or_insert_with(|| DayPoint {
                day: day.to_owned(),
                count: 1,
            });
    }

    by_day.into_values().collect()
}
