//! Append-only audit history of layout mutations.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default number of records returned by [`AuditSink::recent`].
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// The kind of mutation an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A table was dragged to a new position.
    MoveTable,
    /// A seat's name or group changed.
    UpdateChair,
    /// A table's seat count changed.
    AdjustChairCount,
    /// The operator saved the layout manually.
    SaveTables,
    /// The operator discarded unsaved edits.
    ResetChanges,
}

impl ActionKind {
    /// Returns the wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::MoveTable => "move_table",
            ActionKind::UpdateChair => "update_chair",
            ActionKind::AdjustChairCount => "adjust_chair_count",
            ActionKind::SaveTables => "save_tables",
            ActionKind::ResetChanges => "reset_changes",
        }
    }

    /// Parses an action from its wire name.
    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "move_table" => Some(ActionKind::MoveTable),
            "update_chair" => Some(ActionKind::UpdateChair),
            "adjust_chair_count" => Some(ActionKind::AdjustChairCount),
            "save_tables" => Some(ActionKind::SaveTables),
            "reset_changes" => Some(ActionKind::ResetChanges),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable audit record.
///
/// Records are append-only and never mutated. The timestamp is assigned by
/// the sink at append time, not by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Free-text operator label.
    pub operator: String,
    /// What kind of mutation happened.
    pub action: ActionKind,
    /// Structured details of the mutation (before/after values etc.).
    pub details: serde_json::Value,
    /// Server-assigned timestamp.
    pub created_at: DateTime<Utc>,
}

/// An append-only sink for audit records.
///
/// Appends are best-effort from the editor's perspective: the caller logs
/// failures and never lets them affect document state.
pub trait AuditSink: Send + Sync {
    /// Appends a record. The sink assigns `created_at`.
    fn append(
        &self,
        operator: &str,
        action: ActionKind,
        details: serde_json::Value,
    ) -> StoreResult<()>;

    /// Returns up to `limit` records, newest first.
    fn recent(&self, limit: usize) -> StoreResult<Vec<ChangeRecord>>;
}

/// An in-memory audit log with failure injection.
#[derive(Default)]
pub struct MemoryAuditLog {
    records: RwLock<Vec<ChangeRecord>>,
    fail_appends: AtomicBool,
}

impl MemoryAuditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent appends fail, for exercising error paths.
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Total number of records ever appended.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if no records have been appended.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(
        &self,
        operator: &str,
        action: ActionKind,
        details: serde_json::Value,
    ) -> StoreResult<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::write("injected audit failure"));
        }
        self.records.write().push(ChangeRecord {
            operator: operator.to_string(),
            action,
            details,
            created_at: Utc::now(),
        });
        Ok(())
    }

    fn recent(&self, limit: usize) -> StoreResult<Vec<ChangeRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
