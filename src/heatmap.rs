//! Logging-consistency heatmap.
//!
//! A fixed 35-day strip ending at the most recent logged date. A day only
//! lights up when it has an entry; how brightly is decided by its position
//! in the window, purely to vary the texture of the strip.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::models::{HeatmapCell, Intensity, WeightEntry};

/// Length of the strip, in days.
pub const WINDOW_DAYS: i64 = 35;

/// Build the strip for a newest-first entry list.
///
/// Offsets divisible by 7 render strong, the remaining multiples of 3
/// medium, every other logged day faint. An empty log yields an empty strip
/// rather than 35 blank cells.
pub fn window_for(entries: &[WeightEntry]) -> Vec<HeatmapCell> {
    let Some(latest) = entries.first() else {
        return Vec::new();
    };
    let logged: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();
    let start = latest.date - Duration::days(WINDOW_DAYS - 1);
    (0..WINDOW_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let intensity = if !logged.contains(&date) {
                Intensity::None
            } else if offset % 7 == 0 {
                Intensity::Strong
            } else if offset % 3 == 0 {
                Intensity::Medium
            } else {
                Intensity::Faint
            };
            HeatmapCell { date, intensity }
        })
        .collect()
}
