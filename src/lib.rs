//! Client-side sync engine for the Weighty weight-tracker dashboard.
//!
//! Talks to the Weighty HTTP service, keeps an atomically replaced snapshot
//! of profile, entries and streaks, derives the chart series locally, and
//! drives render ports and one-shot notifications through every refresh and
//! mutation cycle.

pub mod achievements;
pub mod client;
pub mod error;
pub mod heatmap;
pub mod models;
pub mod ports;
pub mod series;
pub mod sync;

pub use client::WeightyClient;
pub use error::{DashError, DashResult};
pub use models::{
    BmiCategory, Derived, EntriesPage, EntryDraft, EntryId, HeatmapCell, Intensity, Profile,
    Projection, SaveOutcome, SavedEntry, SeriesPoint, Snapshot, Streak, Totals, WeightEntry,
};
pub use ports::{ConfirmDelete, Notifier, ToastKind, ViewPort};
pub use sync::{Dashboard, WeightService};
