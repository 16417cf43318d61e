//! # SeatPlan Store
//!
//! External-collaborator interfaces for the seating-chart editor:
//!
//! - [`DocumentStore`] — the shared remote document holding the layout:
//!   point read, whole-document upsert, and change-notification
//!   subscription
//! - [`AuditSink`] — append-only change history with newest-first reads
//!
//! Both traits ship with in-memory reference implementations
//! ([`MemoryDocumentStore`], [`MemoryAuditLog`]) that support failure
//! injection, so the synchronization core can be exercised without any
//! network backend.
//!
//! ## Contracts
//!
//! - `upsert` is last-writer-wins at whole-document granularity
//! - Subscribers may receive notifications for their own writes (self-echo);
//!   callers must tolerate this
//! - Audit appends assign the timestamp at the sink ("server timestamp")

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod document;
mod error;

pub use audit::{
    ActionKind, AuditSink, ChangeRecord, MemoryAuditLog, DEFAULT_RECENT_LIMIT,
};
pub use document::{DocumentStore, MemoryDocumentStore, LAYOUT_DOC_ID};
pub use error::{StoreError, StoreResult};
