use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Row identifier assigned by the service.
pub type EntryId = i64;

/// Placeholder shown in the projection slot until a save brings real trend
/// parameters down from the service.
pub const PROJECTION_PLACEHOLDER: &str = "Save an entry to project your trend.";

/// User profile as served by `GET /api/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Profile {
    pub name: String,
    pub height_feet: i64,
    pub height_inches: i64,
    /// Weight when tracking started, in kg
    pub starting_weight: f64,
    /// Target the goal line is drawn at, in kg
    pub goal_weight: f64,
}

/// Service-computed BMI bucket. Variant names match the service's labels
/// byte for byte, so serde needs no renames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// One logged weight with the service's per-row enrichments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    /// Weight in kg
    pub weight: f64,
    /// Delta against the previous row, 0.0 for the oldest
    pub change_from_last: f64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    /// Badge color the service pairs with the category
    pub bmi_color: String,
    /// Trailing 7-row average, computed by the service
    pub avg7: f64,
    /// Trailing 30-row average, computed by the service
    pub avg30: f64,
}

/// Consecutive-day logging counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Totals {
    pub count: u64,
}

/// Wire shape of `GET /api/weights`: newest-first rows plus list-wide
/// counters.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct EntriesPage {
    pub items: Vec<WeightEntry>,
    pub totals: Totals,
    pub streak: Streak,
}

/// One chart point. The service serializes these as `{x, y}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "x")]
    pub date: NaiveDate,
    #[serde(rename = "y")]
    pub value: f64,
}

/// Fitted trend parameters, or the reason there is no trend to draw.
///
/// The service reports both shapes through one object whose `message` field
/// is null exactly when slope and intercept are present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProjectionPayload")]
pub enum Projection {
    Trend {
        /// Regression slope in kg per day
        slope_per_day: f64,
        /// Regression intercept at the first fitted index
        intercept: f64,
        /// Goal-crossing date as the service formats it, empty when the
        /// trend never reaches the goal
        eta_label: String,
    },
    Insufficient { message: String },
}

impl Projection {
    /// Placeholder used by plain refreshes, which never carry a trend.
    pub fn placeholder() -> Self {
        Projection::Insufficient {
            message: PROJECTION_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectionPayload {
    slope: Option<f64>,
    intercept: Option<f64>,
    eta: Option<String>,
    message: Option<String>,
}

impl From<ProjectionPayload> for Projection {
    fn from(raw: ProjectionPayload) -> Self {
        match raw.message {
            Some(message) => Projection::Insufficient { message },
            None => Projection::Trend {
                slope_per_day: raw.slope.unwrap_or(0.0),
                intercept: raw.intercept.unwrap_or(0.0),
                eta_label: raw.eta.unwrap_or_default(),
            },
        }
    }
}

/// Chart-ready series bundle, all ascending by date.
///
/// Successful saves carry one down pre-built under `charts`; plain refreshes
/// rebuild everything locally from the entry list instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Derived {
    #[serde(rename = "trend")]
    pub value_series: Vec<SeriesPoint>,
    #[serde(rename = "avg7")]
    pub avg7_series: Vec<SeriesPoint>,
    #[serde(rename = "avg30")]
    pub avg30_series: Vec<SeriesPoint>,
    pub projection: Projection,
}

impl Default for Derived {
    fn default() -> Self {
        Self {
            value_series: Vec::new(),
            avg7_series: Vec::new(),
            avg30_series: Vec::new(),
            projection: Projection::placeholder(),
        }
    }
}

/// Everything the dashboard renders, captured in one consistent piece.
///
/// A sync cycle replaces the whole snapshot or none of it; ports only ever
/// borrow it, so a render pass cannot observe a half-applied update.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub profile: Profile,
    /// Newest first, exactly as the service lists them
    pub entries: Vec<WeightEntry>,
    pub streak: Streak,
    pub series: Derived,
}

impl Snapshot {
    /// Pre-first-sync state: nothing logged, nothing projected.
    pub fn empty() -> Self {
        Self {
            profile: Profile::default(),
            entries: Vec::new(),
            streak: Streak::default(),
            series: Derived::default(),
        }
    }
}

/// Visual weight of one heatmap cell. Tiers are positional, not magnitude
/// based: where the day falls in the window decides how bright it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    None,
    Faint,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub intensity: Intensity,
}

/// Raw weight-form fields, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryDraft {
    pub date: String,
    pub weight: String,
}

impl EntryDraft {
    pub fn new(date: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            weight: weight.into(),
        }
    }

    /// Local pre-submit check: the date must be present and the weight must
    /// parse as a finite number. Range rules stay with the service.
    pub fn validated(&self) -> DashResult<(String, f64)> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(DashError::Validation("Please pick a date.".to_string()));
        }
        let weight = self
            .weight
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .ok_or_else(|| DashError::Validation("Weight must be a number.".to_string()))?;
        Ok((date.to_string(), weight))
    }
}

/// The bare row a successful save echoes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub weight: f64,
}

/// Parsed body of a successful POST or PUT on `/api/weights`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveOutcome {
    pub item: SavedEntry,
    /// Catalog keys of achievements this save unlocked
    #[serde(default)]
    pub unlocks: Vec<String>,
    /// Server-rebuilt chart bundle; PUT responses leave it out
    #[serde(default)]
    pub charts: Option<Derived>,
}
