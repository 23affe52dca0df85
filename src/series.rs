//! Chart series derivation.
//!
//! The service hands the dashboard a newest-first entry list; the charts
//! want ascending series. Everything in here is a pure reshaping of that
//! list, so it can run on every sync without touching the network.

use chrono::Duration;

use crate::models::{Derived, Projection, SeriesPoint, WeightEntry};

/// How many calendar days the trend overlay extends past the last log.
pub const PROJECTION_DAYS: i64 = 30;

/// Reshape the newest-first entry list into the ascending series the charts
/// consume. The per-row averages are reordered as-is, never recomputed.
pub fn build_derived(entries: &[WeightEntry], projection: Projection) -> Derived {
    let mut value_series = Vec::with_capacity(entries.len());
    let mut avg7_series = Vec::with_capacity(entries.len());
    let mut avg30_series = Vec::with_capacity(entries.len());
    for entry in entries.iter().rev() {
        value_series.push(SeriesPoint {
            date: entry.date,
            value: entry.weight,
        });
        avg7_series.push(SeriesPoint {
            date: entry.date,
            value: entry.avg7,
        });
        avg30_series.push(SeriesPoint {
            date: entry.date,
            value: entry.avg30,
        });
    }
    Derived {
        value_series,
        avg7_series,
        avg30_series,
        projection,
    }
}

/// Flat target overlay: one point per charted date, all at the goal weight.
pub fn goal_line(value_series: &[SeriesPoint], goal_weight: f64) -> Vec<SeriesPoint> {
    value_series
        .iter()
        .map(|p| SeriesPoint {
            date: p.date,
            value: goal_weight,
        })
        .collect()
}

/// Extend the fitted trend [`PROJECTION_DAYS`] days past the last logged
/// date.
///
/// The regression was fitted over entry indices, so day `i` of the overlay
/// evaluates at index `i + (points - 1)`. Starting over from index zero
/// would replay the fit instead of continuing it.
pub fn projection_points(
    projection: &Projection,
    value_series: &[SeriesPoint],
) -> Vec<SeriesPoint> {
    let (slope, intercept) = match projection {
        Projection::Trend {
            slope_per_day,
            intercept,
            ..
        } => (*slope_per_day, *intercept),
        Projection::Insufficient { .. } => return Vec::new(),
    };
    let Some(last) = value_series.last() else {
        return Vec::new();
    };
    let origin = value_series.len().saturating_sub(1) as f64;
    (0..PROJECTION_DAYS)
        .map(|i| SeriesPoint {
            date: last.date + Duration::days(i),
            value: intercept + slope * (origin + i as f64),
        })
        .collect()
}

/// All-time mean weight for the averages panel. `None` until something is
/// logged.
pub fn overall_average(entries: &[WeightEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: f64 = entries.iter().map(|e| e.weight).sum();
    Some(sum / entries.len() as f64)
}
