use chrono::{Duration, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::metrics::{MetricRecord, MetricsCollection};

// ─── Constants ───────────────────────────────────────────────────

/// Last day of the generated window. Fixed so that a given seed always
/// produces byte-identical data, including the time series.
const ANCHOR_DAY: (i32, u32, u32) = (2025, 3, 31);

// ─── Pools ───────────────────────────────────────────────────────

/// Routes of the delivery API, weighted roughly like real traffic:
/// order submissions dominate, debug calls are rare.
static ROUTES: &[(&str, &str, u32)] = &[
    ("/pedido", "POST", 40),
    ("/pedidos", "GET", 30),
    ("/metricas", "GET", 15),
    ("/login", "POST", 10),
    ("/debug-credenciais", "GET", 5),
];

/// Status pool: mostly success, a believable tail of failures.
static STATUSES: &[(u16, u32)] = &[
    (200, 55),
    (201, 20),
    (400, 8),
    (401, 6),
    (404, 5),
    (500, 4),
    (503, 2),
];

// ─── Generation ──────────────────────────────────────────────────

/// Build a deterministic sample request log: `records` entries spread
/// over the `days` ending at the anchor day. Same inputs, same output.
///
/// A small share of records is generated without an endpoint or status
/// so the dashboard's fallback paths show up in the preview too.
pub fn generate(records: usize, days: u32, seed: u64) -> MetricsCollection {
    let mut rng = StdRng::seed_from_u64(seed);
    let (y, m, d) = ANCHOR_DAY;
    let anchor = NaiveDate::from_ymd_opt(y, m, d).expect("anchor date is valid");

    let mut collection = MetricsCollection::new();
    for i in 0..records {
        let id = format!("req_{:06}", i + 1);

        let day = anchor - Duration::days(rng.gen_range(0..days.max(1)) as i64);
        let time = NaiveTime::from_hms_opt(
            rng.gen_range(0..24),
            rng.gen_range(0..60),
            rng.gen_range(0..60),
        )
        .expect("generated time is valid");
        let timestamp_iso = format!("{}T{}Z", day.format("%Y-%m-%d"), time.format("%H:%M:%S"));

        let &(route, method, _) = pick_weighted(&mut rng, ROUTES, |r| r.2);
        let &(status, _) = pick_weighted(&mut rng, STATUSES, |s| s.1);

        // ~4% of old records predate route tagging, ~3% lost their status
        let endpoint = (!rng.gen_bool(0.04)).then(|| route.to_string());
        let status_code = (!rng.gen_bool(0.03)).then_some(status);

        // slow outliers on roughly one call in twenty
        let response_time_ms: f64 = if rng.gen_bool(0.05) {
            rng.gen_range(800.0..2500.0)
        } else {
            rng.gen_range(12.0..350.0)
        };

        collection.insert(
            id,
            MetricRecord {
                endpoint,
                method: Some(method.to_string()),
                status_code,
                response_time_ms: (response_time_ms * 100.0).round() / 100.0,
                timestamp_iso,
                day_bucket: None,
            },
        );
    }

    collection
}

fn pick_weighted<'a, T, F>(rng: &mut StdRng, pool: &'a [T], weight: F) -> &'a T
where
    F: Fn(&T) -> u32,
{
    let total: u32 = pool.iter().map(&weight).sum();
    let mut roll = rng.gen_range(0..total);
    for item in pool {
        let w = weight(item);
        if roll < w {
            return item;
        }
        roll -= w;
    }
    // weights sum exactly to total, the loop always returns
    unreachable!("weighted pick exhausted pool")
}
