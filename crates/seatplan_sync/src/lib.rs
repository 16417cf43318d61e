//! # SeatPlan Sync
//!
//! The synchronization core of the seating-chart editor: an optimistic,
//! eventually-consistent editing session over a shared remote document.
//!
//! This crate provides:
//! - [`EditorSession`] — state machine over `{draft, saved, dirty,
//!   suppress_next_echo}` with every mutator entry point the presentation
//!   layer needs
//! - [`SessionConfig`] — operator label and document id configuration
//! - [`SeatField`] — typed seat mutations (name or group)
//!
//! ## Reconciliation policy
//!
//! Local-edit precedence with saved-snapshot tracking, no merge:
//!
//! 1. A remote update while the draft is clean replaces both draft and
//!    saved snapshot — remote wins when there is nothing to lose.
//! 2. A remote update while the draft is dirty only advances the saved
//!    snapshot; the draft is untouched until the operator saves or resets.
//! 3. A successful persist makes the saved snapshot equal the draft and
//!    arms a one-shot suppression flag so the write's own echo is not
//!    mistaken for an external change.
//!
//! ## Key invariants
//!
//! - `reset` always restores `draft == saved` exactly
//! - `persist` success always yields `dirty == false` and `saved == draft`
//! - Audit failures never escape a mutator and never touch document state
//! - Nothing here is process-fatal; every failure is recoverable by a
//!   manual save or the next remote notification

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod session;

pub use config::{operator_from_query, SessionConfig, DEFAULT_OPERATOR};
pub use error::{SessionError, SessionResult};
pub use session::{EditorSession, SeatField};
