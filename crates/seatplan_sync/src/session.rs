//! The editing session state machine.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use seatplan_layout::{Group, Layout};
use seatplan_store::{ActionKind, AuditSink, ChangeRecord, DocumentStore, StoreError};
use serde_json::json;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

/// A typed seat mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SeatField {
    /// Replace the guest name.
    Name(String),
    /// Replace the group label (`None` clears it).
    Group(Option<Group>),
}

/// Draft and saved-snapshot state, present once the session is initialized.
#[derive(Debug)]
struct DocState {
    /// What the operator is editing and viewing.
    draft: Layout,
    /// The layout last confirmed to match the remote store.
    saved: Layout,
    /// True iff the draft has edits not yet persisted.
    dirty: bool,
}

/// An editing session over the shared layout document.
///
/// The session exclusively owns both the draft and the saved snapshot; the
/// presentation layer reads the draft through [`EditorSession::draft`] and
/// mutates it only through the entry points here. All methods run on the
/// session's single logical thread; remote notifications are drained onto
/// that thread via [`EditorSession::poll_remote`].
///
/// Mutators follow a fixed sequence: apply the edit to the draft, set the
/// dirty flag, append an audit entry (best-effort), and schedule a persist.
/// Scheduled persists run on the next [`EditorSession::flush`], mirroring a
/// cooperative event loop where the save completes after the gesture that
/// triggered it.
pub struct EditorSession<S: DocumentStore, A: AuditSink> {
    config: SessionConfig,
    store: Arc<S>,
    audit: Arc<A>,
    state: Option<DocState>,
    /// One-shot flag distinguishing this session's own write echo from a
    /// genuine external update. Set when an upsert succeeds, consumed by
    /// the first subsequent notification.
    suppress_next_echo: bool,
    /// True when a mutator has scheduled a persist that has not run yet.
    persist_scheduled: bool,
    remote: Option<Receiver<Layout>>,
}

impl<S: DocumentStore, A: AuditSink> EditorSession<S, A> {
    /// Creates a session. Call [`EditorSession::initialize`] before using
    /// any other entry point.
    pub fn new(config: SessionConfig, store: Arc<S>, audit: Arc<A>) -> Self {
        Self {
            config,
            store,
            audit,
            state: None,
            suppress_next_echo: false,
            persist_scheduled: false,
            remote: None,
        }
    }

    /// The operator label recorded in audit entries.
    pub fn operator(&self) -> &str {
        &self.config.operator
    }

    /// Returns true once [`EditorSession::initialize`] has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// True iff the draft has edits not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.state.as_ref().map(|s| s.dirty).unwrap_or(false)
    }

    /// True when a mutator has scheduled a persist that has not run yet.
    pub fn has_scheduled_persist(&self) -> bool {
        self.persist_scheduled
    }

    /// The current draft, for rendering.
    pub fn draft(&self) -> SessionResult<&Layout> {
        self.state
            .as_ref()
            .map(|s| &s.draft)
            .ok_or(SessionError::NotInitialized)
    }

    /// The last layout confirmed to match the remote store.
    pub fn saved(&self) -> SessionResult<&Layout> {
        self.state
            .as_ref()
            .map(|s| &s.saved)
            .ok_or(SessionError::NotInitialized)
    }

    /// Loads the shared document, seeding it if missing.
    ///
    /// Subscribes to change notifications, then reads the document by the
    /// configured id. A missing document is seeded with [`Layout::initial`]
    /// and written back; either way the session starts with
    /// `draft == saved` and a clean dirty flag. Read or seed-write failures
    /// surface to the caller.
    pub fn initialize(&mut self) -> SessionResult<()> {
        let rx = self.store.subscribe(&self.config.doc_id)?;
        self.remote = Some(rx);

        let layout = match self.store.read(&self.config.doc_id)? {
            Some(layout) => {
                tracing::debug!(doc_id = %self.config.doc_id, "loaded existing layout");
                layout
            }
            None => {
                let seed = Layout::initial();
                self.store.upsert(&self.config.doc_id, &seed)?;
                // The seed write is our own; arm suppression for its echo.
                self.suppress_next_echo = true;
                tracing::info!(doc_id = %self.config.doc_id, "seeded missing layout document");
                seed
            }
        };

        self.state = Some(DocState {
            draft: layout.clone(),
            saved: layout,
            dirty: false,
        });
        Ok(())
    }

    /// Reconciles an incoming remote document value.
    ///
    /// A notification caused by this session's own last write is consumed
    /// by the one-shot suppression flag and ignored. Otherwise: a clean
    /// draft is replaced wholesale (remote wins when there is nothing to
    /// lose); a dirty draft is left untouched and only the saved snapshot
    /// advances — local edits take precedence until the operator saves or
    /// resets.
    pub fn on_remote_update(&mut self, layout: Layout) -> SessionResult<()> {
        if self.suppress_next_echo {
            self.suppress_next_echo = false;
            tracing::debug!("ignoring self-echo notification");
            return Ok(());
        }

        let state = self.state.as_mut().ok_or(SessionError::NotInitialized)?;
        if state.dirty {
            tracing::debug!("remote update while dirty: advancing saved snapshot only");
            state.saved = layout;
        } else {
            tracing::debug!("remote update while clean: adopting remote layout");
            state.draft = layout.clone();
            state.saved = layout;
        }
        Ok(())
    }

    /// Drains pending remote notifications and reconciles each in order.
    ///
    /// Returns the number of notifications drained. A disconnected
    /// notification channel surfaces as a subscription error.
    pub fn poll_remote(&mut self) -> SessionResult<usize> {
        let rx = self.remote.as_ref().ok_or(SessionError::NotInitialized)?;

        let mut pending = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(layout) => pending.push(layout),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(StoreError::subscription("change feed disconnected").into());
                }
            }
        }

        let drained = pending.len();
        for layout in pending {
            self.on_remote_update(layout)?;
        }
        Ok(drained)
    }

    /// Moves a table by a position delta (gesture completion).
    ///
    /// Applies the delta, dirties the draft, records a `move_table` audit
    /// entry with the final position, and schedules a persist.
    pub fn move_table(&mut self, table_id: u32, dx: f64, dy: f64) -> SessionResult<()> {
        let state = self.state.as_mut().ok_or(SessionError::NotInitialized)?;
        let table = state
            .draft
            .table_mut(table_id)
            .ok_or(SessionError::UnknownTable { table_id })?;

        table.translate(dx, dy);
        let (x, y) = (table.x, table.y);
        state.dirty = true;

        self.audit_best_effort(
            ActionKind::MoveTable,
            json!({ "table_id": table_id, "x": x, "y": y }),
        );
        self.persist_scheduled = true;
        Ok(())
    }

    /// Marks a table as being dragged. Presentation state only: no dirty
    /// flag, no audit entry, no persist.
    pub fn begin_drag(&mut self, table_id: u32) -> SessionResult<()> {
        self.set_dragging(table_id, true)
    }

    /// Clears a table's dragging mark.
    pub fn end_drag(&mut self, table_id: u32) -> SessionResult<()> {
        self.set_dragging(table_id, false)
    }

    fn set_dragging(&mut self, table_id: u32, dragging: bool) -> SessionResult<()> {
        let state = self.state.as_mut().ok_or(SessionError::NotInitialized)?;
        let table = state
            .draft
            .table_mut(table_id)
            .ok_or(SessionError::UnknownTable { table_id })?;
        table.dragging = dragging;
        Ok(())
    }

    /// Updates a seat's name or group.
    ///
    /// Records an `update_chair` audit entry with before/after values and
    /// schedules a persist.
    pub fn update_seat(
        &mut self,
        table_id: u32,
        seat_id: u32,
        field: SeatField,
    ) -> SessionResult<()> {
        let state = self.state.as_mut().ok_or(SessionError::NotInitialized)?;
        let table = state
            .draft
            .table_mut(table_id)
            .ok_or(SessionError::UnknownTable { table_id })?;
        let seat = table
            .seat_mut(seat_id)
            .ok_or(SessionError::UnknownSeat { table_id, seat_id })?;

        let details = match field {
            SeatField::Name(name) => {
                let before = std::mem::replace(&mut seat.name, name);
                json!({
                    "table_id": table_id,
                    "seat_id": seat_id,
                    "field": "name",
                    "before": before,
                    "after": seat.name,
                })
            }
            SeatField::Group(group) => {
                let before = std::mem::replace(&mut seat.group, group);
                json!({
                    "table_id": table_id,
                    "seat_id": seat_id,
                    "field": "group",
                    "before": before.map(|g| g.label()),
                    "after": seat.group.map(|g| g.label()),
                })
            }
        };
        state.dirty = true;

        self.audit_best_effort(ActionKind::UpdateChair, details);
        self.persist_scheduled = true;
        Ok(())
    }

    /// Adjusts a table's seat count by a delta, clamped to the valid range.
    ///
    /// A complete no-op for the special head table: no dirty flag, no audit
    /// entry, no persist. Otherwise records an `adjust_chair_count` audit
    /// entry with before/after counts and schedules a persist.
    pub fn adjust_seat_count(&mut self, table_id: u32, delta: i64) -> SessionResult<()> {
        let state = self.state.as_mut().ok_or(SessionError::NotInitialized)?;
        let table = state
            .draft
            .table_mut(table_id)
            .ok_or(SessionError::UnknownTable { table_id })?;

        if table.special {
            tracing::debug!(table_id, "special table is exempt from seat-count adjustment");
            return Ok(());
        }

        let before = table.seat_count();
        table.resize_seats(before as i64 + delta);
        let after = table.seat_count();
        state.dirty = true;

        self.audit_best_effort(
            ActionKind::AdjustChairCount,
            json!({ "table_id": table_id, "before": before, "after": after }),
        );
        self.persist_scheduled = true;
        Ok(())
    }

    /// Upserts the draft to the document store.
    ///
    /// On success the saved snapshot becomes the draft value, the dirty
    /// flag clears, and echo suppression is armed for the write's own
    /// notification. On failure the draft and dirty flag are untouched and
    /// the error surfaces; there is no automatic retry — the next edit or a
    /// manual save retries.
    pub fn persist(&mut self) -> SessionResult<()> {
        let state = self.state.as_mut().ok_or(SessionError::NotInitialized)?;
        // Whatever happens, this attempt consumes the scheduled persist.
        self.persist_scheduled = false;

        self.store.upsert(&self.config.doc_id, &state.draft)?;
        state.saved = state.draft.clone();
        state.dirty = false;
        self.suppress_next_echo = true;
        tracing::debug!(doc_id = %self.config.doc_id, "draft persisted");
        Ok(())
    }

    /// Runs the scheduled persist, if any.
    ///
    /// Consecutive mutations between flushes would each send the same
    /// current draft, so a single upsert of that draft is performed; this
    /// is observationally identical under the last-writer-wins policy.
    /// Returns true if a persist ran.
    pub fn flush(&mut self) -> SessionResult<bool> {
        if !self.persist_scheduled {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Manual save: persists immediately, regardless of any scheduled
    /// persist, and records a `save_tables` audit entry on success.
    pub fn save(&mut self) -> SessionResult<()> {
        self.persist()?;
        self.audit_best_effort(ActionKind::SaveTables, json!({}));
        Ok(())
    }

    /// Discards unsaved edits: restores `draft = saved`, clears the dirty
    /// flag, and records a `reset_changes` audit entry. No remote write
    /// occurs.
    pub fn reset(&mut self) -> SessionResult<()> {
        let state = self.state.as_mut().ok_or(SessionError::NotInitialized)?;
        state.draft = state.saved.clone();
        state.dirty = false;
        self.persist_scheduled = false;

        self.audit_best_effort(ActionKind::ResetChanges, json!({}));
        Ok(())
    }

    /// Reads recent audit history, newest first.
    pub fn history(&self, limit: usize) -> SessionResult<Vec<ChangeRecord>> {
        Ok(self.audit.recent(limit)?)
    }

    /// Appends an audit entry, logging and swallowing any failure. Audit
    /// writes never affect document state.
    fn audit_best_effort(&self, action: ActionKind, details: serde_json::Value) {
        if let Err(error) = self.audit.append(&self.config.operator, action, details) {
            tracing::warn!(%action, %error, "audit append failed");
        }
    }
}
