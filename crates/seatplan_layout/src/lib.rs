//! # SeatPlan Layout Model
//!
//! Pure data model for the seating chart: tables, seats, geometry, and the
//! derivation rules that govern them. This crate performs no I/O.
//!
//! This crate provides:
//! - [`Seat`] and [`Group`] — a single chair and its guest assignment
//! - [`Table`] — an ordered ring of seats with a position, including the
//!   seat-count resize rule
//! - [`Layout`] — the full document: every table for the event
//! - [`LayoutSummary`] — the printable-summary derivation (occupants per
//!   table, occupied-seat counts per group)
//!
//! ## Key invariants
//!
//! - Seat identities are always `table_id * 100 + index`, contiguous from
//!   index 0
//! - Seats are spaced evenly at `2π / count` radians starting at angle 0
//! - The head table (id 0) has exactly two seats and never resizes
//! - Resizing preserves name/group assignments by positional index

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod layout;
mod seat;
mod summary;
mod table;

pub use layout::{Layout, DEFAULT_SEAT_COUNT, HEAD_TABLE_ID, REGULAR_TABLE_COUNT};
pub use seat::{Group, Seat};
pub use summary::{GroupCount, LayoutSummary, SeatOccupant, TableSummary};
pub use table::{Table, MAX_SEATS, MIN_SEATS};
