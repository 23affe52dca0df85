//! Sync controller.
//!
//! One object owns the dashboard's state and drives every cycle: fetch,
//! derive, swap the snapshot, render the ports. Mutations run through the
//! same funnel so the table, charts and counters never drift apart.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::achievements;
use crate::error::{DashError, DashResult};
use crate::models::{
    Derived, EntriesPage, EntryDraft, EntryId, Profile, Projection, SaveOutcome, Snapshot,
};
use crate::ports::{ConfirmDelete, Notifier, ToastKind, ViewPort};
use crate::series;

const SAVED_TOAST: &str = "Entry saved.";
const DELETED_TOAST: &str = "Entry deleted.";

/// What the controller needs from the remote service.
///
/// [`WeightyClient`](crate::client::WeightyClient) is the production
/// implementation; tests substitute scripted fakes.
pub trait WeightService: Send + Sync {
    fn fetch_profile(&self) -> impl Future<Output = DashResult<Profile>> + Send;
    fn fetch_entries(&self) -> impl Future<Output = DashResult<EntriesPage>> + Send;
    fn create_entry(
        &self,
        date: &str,
        weight: f64,
    ) -> impl Future<Output = DashResult<SaveOutcome>> + Send;
    fn update_entry(
        &self,
        id: EntryId,
        date: &str,
        weight: f64,
    ) -> impl Future<Output = DashResult<SaveOutcome>> + Send;
    fn delete_entry(&self, id: EntryId) -> impl Future<Output = DashResult<()>> + Send;
}

/// Owns the view state and runs the sync protocol.
///
/// Reads and writes funnel through one lock so renders always see a fully
/// formed snapshot, and a monotonic sequence number keeps a slow response
/// from clobbering a newer one: every cycle takes a ticket up front and only
/// applies if nothing later has applied already.
pub struct Dashboard<S> {
    service: S,
    issued: AtomicU64,
    inner: Mutex<Inner>,
}

struct Inner {
    snapshot: Arc<Snapshot>,
    applied: u64,
    ports: Vec<Box<dyn ViewPort>>,
    notifier: Box<dyn Notifier>,
    confirmer: Box<dyn ConfirmDelete>,
}

impl<S: WeightService> Dashboard<S> {
    pub fn new(service: S, notifier: Box<dyn Notifier>, confirmer: Box<dyn ConfirmDelete>) -> Self {
        Self {
            service,
            issued: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                snapshot: Arc::new(Snapshot::empty()),
                applied: 0,
                ports: Vec::new(),
                notifier,
                confirmer,
            }),
        }
    }

    /// Register a render surface. Ports render in registration order; the
    /// usual wiring adds cards, table, charts, averages panel, heatmap.
    pub fn add_port(&mut self, port: Box<dyn ViewPort>) {
        self.inner.get_mut().ports.push(port);
    }

    /// Handle to the current view state.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.lock().await.snapshot.clone()
    }

    /// Re-fetch everything and re-render. Safe to call while another refresh
    /// is still in flight; whichever was issued last wins.
    pub async fn refresh(&self) -> DashResult<()> {
        self.sync(None).await
    }

    /// Validate and submit a new entry, then re-sync.
    ///
    /// Emits one toast per outcome, plus a celebration when the save unlocks
    /// achievements. The returned error is for flow control; by the time the
    /// caller sees it, the user already has.
    pub async fn create(&self, draft: &EntryDraft) -> DashResult<()> {
        self.submit(draft, None).await
    }

    /// Same protocol as [`create`](Self::create), aimed at an existing row.
    pub async fn update(&self, id: EntryId, draft: &EntryDraft) -> DashResult<()> {
        self.submit(draft, Some(id)).await
    }

    /// Delete a row after explicit confirmation. Declining is a silent
    /// no-op, reported as [`DashError::Cancelled`].
    pub async fn remove(&self, id: EntryId) -> DashResult<()> {
        let confirmed = self.inner.lock().await.confirmer.confirm_delete(id);
        if !confirmed {
            debug!(id, "delete not confirmed");
            return Err(DashError::Cancelled);
        }
        if let Err(err) = self.service.delete_entry(id).await {
            self.surface(&err).await;
            return Err(err);
        }
        self.inner
            .lock()
            .await
            .notifier
            .toast(ToastKind::Success, DELETED_TOAST);
        self.sync(None).await
    }

    async fn submit(&self, draft: &EntryDraft, target: Option<EntryId>) -> DashResult<()> {
        let (date, weight) = match draft.validated() {
            Ok(fields) => fields,
            Err(err) => {
                self.surface(&err).await;
                return Err(err);
            }
        };
        let sent = match target {
            Some(id) => self.service.update_entry(id, &date, weight).await,
            None => self.service.create_entry(&date, weight).await,
        };
        let outcome = match sent {
            Ok(outcome) => outcome,
            Err(err) => {
                self.surface(&err).await;
                return Err(err);
            }
        };
        info!(id = outcome.item.id, unlocks = outcome.unlocks.len(), "entry saved");
        {
            let mut inner = self.inner.lock().await;
            inner.notifier.toast(ToastKind::Success, SAVED_TOAST);
            if !outcome.unlocks.is_empty() {
                let names: Vec<String> = outcome
                    .unlocks
                    .iter()
                    .map(|key| achievements::display_name(key))
                    .collect();
                let message = format!("Achievement unlocked: {}", names.join(", "));
                inner.notifier.toast(ToastKind::Success, &message);
                inner.notifier.confetti();
            }
        }
        self.sync(outcome.charts).await
    }

    /// One full cycle: fetch fresh state, derive series, swap the snapshot,
    /// render. `charts` lets a save reuse the server-built bundle instead of
    /// deriving locally.
    async fn sync(&self, charts: Option<Derived>) -> DashResult<()> {
        // Ticket before the fetch, so ordering reflects issue time.
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let (profile, page) = match self.fetch_state().await {
            Ok(parts) => parts,
            Err(err) => {
                self.surface(&err).await;
                return Err(err);
            }
        };
        let series = match charts {
            Some(prebuilt) => prebuilt,
            None => series::build_derived(&page.items, Projection::placeholder()),
        };
        let snapshot = Arc::new(Snapshot {
            profile,
            entries: page.items,
            streak: page.streak,
            series,
        });

        let mut inner = self.inner.lock().await;
        if seq <= inner.applied {
            debug!(seq, applied = inner.applied, "discarding superseded sync");
            return Ok(());
        }
        inner.applied = seq;
        inner.snapshot = snapshot;
        let view = Arc::clone(&inner.snapshot);
        for port in inner.ports.iter_mut() {
            port.render(&view);
        }
        info!(seq, entries = view.entries.len(), "snapshot applied");
        Ok(())
    }

    async fn fetch_state(&self) -> DashResult<(Profile, EntriesPage)> {
        let profile = self.service.fetch_profile().await?;
        let page = self.service.fetch_entries().await?;
        Ok((profile, page))
    }

    /// Every failure is surfaced here exactly once, as one error toast.
    /// Cancelled never reaches the user.
    async fn surface(&self, err: &DashError) {
        if matches!(err, DashError::Cancelled) {
            return;
        }
        warn!(%err, "dashboard operation failed");
        self.inner
            .lock()
            .await
            .notifier
            .toast(ToastKind::Error, &err.to_string());
    }
}
