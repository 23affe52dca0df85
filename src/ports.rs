//! Seams between the sync engine and whatever renders it.

use crate::models::{EntryId, Snapshot};

/// Toast flavor; success and error banners style differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A render surface fed from the snapshot: summary cards, the entry table,
/// the charts, the averages panel, the heatmap.
///
/// `render` runs once per applied sync, in registration order. Table
/// implementations should key row actions by entry id and route them back
/// through the controller, which outlives every render, so edit and delete
/// keep working no matter how often the rows rebuild.
pub trait ViewPort: Send {
    fn render(&mut self, snapshot: &Snapshot);
}

/// One-shot user feedback: toasts, plus the confetti burst that plays when
/// a save unlocks achievements.
pub trait Notifier: Send {
    fn toast(&mut self, kind: ToastKind, message: &str);
    fn confetti(&mut self);
}

/// Asks the user before a row is deleted. Answers synchronously, like the
/// browser confirm dialog it stands in for.
pub trait ConfirmDelete: Send {
    fn confirm_delete(&mut self, id: EntryId) -> bool;
}
