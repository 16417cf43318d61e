//! Error types for the synchronization core.

use seatplan_store::StoreError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur in an editing session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The document store or audit sink failed.
    ///
    /// Document read/write failures surface here and are user-visible;
    /// audit append failures never take this path (they are logged and
    /// swallowed inside the mutators).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A mutator named a table that is not in the draft.
    #[error("unknown table: {table_id}")]
    UnknownTable {
        /// The table id that was not found.
        table_id: u32,
    },

    /// A mutator named a seat that is not at the given table.
    #[error("unknown seat {seat_id} at table {table_id}")]
    UnknownSeat {
        /// The table that was searched.
        table_id: u32,
        /// The seat id that was not found.
        seat_id: u32,
    },

    /// The session has not been initialized yet.
    #[error("session not initialized")]
    NotInitialized,
}
