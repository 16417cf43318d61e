//! The full layout document and its deterministic seed.

use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Identity of the head table.
pub const HEAD_TABLE_ID: u32 = 0;

/// Number of regular tables in the seed layout (ids 1..=50).
pub const REGULAR_TABLE_COUNT: u32 = 50;

/// Default seat count for a freshly seeded regular table.
pub const DEFAULT_SEAT_COUNT: usize = 10;

/// Head table position in the seed layout.
const HEAD_POSITION: (f64, f64) = (500.0, 80.0);

/// Column x coordinates for the two-column arrangement of regular tables.
const COLUMN_XS: [f64; 2] = [280.0, 720.0];

/// Vertical position of the first row of regular tables.
const FIRST_ROW_Y: f64 = 220.0;

/// Vertical spacing between rows of regular tables.
const ROW_STEP: f64 = 160.0;

/// The entire seating chart: every table for the event.
///
/// This is the whole persisted document. Table order is stable; the head
/// table comes first, followed by regular tables in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// All tables, head table first.
    pub tables: Vec<Table>,
}

impl Layout {
    /// Builds the deterministic seed layout.
    ///
    /// One head table (id 0, fixed position, two seats) plus
    /// [`REGULAR_TABLE_COUNT`] regular tables arranged in two columns of
    /// rows, each with [`DEFAULT_SEAT_COUNT`] seats.
    pub fn initial() -> Self {
        let mut tables = Vec::with_capacity(1 + REGULAR_TABLE_COUNT as usize);
        tables.push(Table::head(HEAD_TABLE_ID, HEAD_POSITION.0, HEAD_POSITION.1));

        for id in 1..=REGULAR_TABLE_COUNT {
            let slot = id - 1;
            let column = (slot % 2) as usize;
            let row = slot / 2;
            tables.push(Table::regular(
                id,
                COLUMN_XS[column],
                FIRST_ROW_Y + f64::from(row) * ROW_STEP,
                DEFAULT_SEAT_COUNT,
            ));
        }

        Self { tables }
    }

    /// Looks up a table by id.
    pub fn table(&self, table_id: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    /// Mutable table lookup by id.
    pub fn table_mut(&mut self, table_id: u32) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    /// Total number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
