//! Printable-summary derivation.
//!
//! The export surface (PDF pagination, rasterization) lives outside this
//! workspace; this module produces the data it renders: one entry per table
//! listing seat occupants and their groups, and one entry per group with the
//! count of occupied seats, sorted alphabetically by group name.

use crate::layout::Layout;
use crate::seat::Group;
use serde::Serialize;
use std::collections::BTreeMap;

/// One occupied seat in a table summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatOccupant {
    /// Derived seat identity.
    pub seat_id: u32,
    /// Guest name.
    pub name: String,
    /// Guest group, if any.
    pub group: Option<Group>,
}

/// Occupants of a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Table identity.
    pub table_id: u32,
    /// Total seats at the table.
    pub seat_count: usize,
    /// Occupied seats, in seat order.
    pub occupants: Vec<SeatOccupant>,
}

/// Occupied-seat count for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    /// The group.
    pub group: Group,
    /// Number of occupied seats carrying this group label.
    pub occupied: usize,
}

/// The printable summary of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    /// One entry per table, in layout order.
    pub tables: Vec<TableSummary>,
    /// One entry per group with at least one occupied seat, sorted
    /// alphabetically by group name.
    pub groups: Vec<GroupCount>,
}

impl LayoutSummary {
    /// Derives the summary for a layout.
    pub fn of(layout: &Layout) -> Self {
        let tables = layout
            .tables
            .iter()
            .map(|table| TableSummary {
                table_id: table.id,
                seat_count: table.seat_count(),
                occupants: table
                    .seats
                    .iter()
                    .filter(|s| s.is_occupied())
                    .map(|s| SeatOccupant {
                        seat_id: s.id,
                        name: s.name.clone(),
                        group: s.group,
                    })
                    .collect(),
            })
            .collect();

        // BTreeMap keyed by label gives the alphabetical ordering directly.
        let mut counts: BTreeMap<&'static str, GroupCount> = BTreeMap::new();
        for table in &layout.tables {
            for seat in table.seats.iter().filter(|s| s.is_occupied()) {
                if let Some(group) = seat.group {
                    counts
                        .entry(group.label())
                        .or_insert(GroupCount { group, occupied: 0 })
                        .occupied += 1;
                }
            }
        }

        Self {
            tables,
            groups: counts.into_values().collect(),
        }
    }

    /// Total number of occupied seats across all tables.
    pub fn occupied_seats(&self) -> usize {
        self.tables.iter().map(|t| t.occupants.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_layout() -> Layout {
        let mut layout = Layout::initial();
        {
            let table = layout.table_mut(1).unwrap();
            table.seats[0].name = "Alice".into();
            table.seats[0].group = Some(Group::Family);
            table.seats[1].name = "Bob".into();
            table.seats[1].group = Some(Group::Friends);
        }
        {
            let table = layout.table_mut(2).unwrap();
            table.seats[0].name = "Carol".into();
            table.seats[0].group = Some(Group::Family);
            table.seats[1].name = "Dave".into();
            // No group for Dave.
        }
        layout
    }

    #[test]
    fn summary_lists_occupants_per_table() {
        let summary = LayoutSummary::of(&populated_layout());

        let table1 = summary.tables.iter().find(|t| t.table_id == 1).unwrap();
        assert_eq!(table1.seat_count, 10);
        assert_eq!(table1.occupants.len(), 2);
        assert_eq!(table1.occupants[0].name, "Alice");
        assert_eq!(table1.occupants[0].seat_id, 100);

        let empty = summary.tables.iter().find(|t| t.table_id == 5).unwrap();
        assert!(empty.occupants.is_empty());
    }

    #[test]
    fn group_counts_are_alphabetical() {
        let summary = LayoutSummary::of(&populated_layout());

        let labels: Vec<&str> = summary.groups.iter().map(|g| g.group.label()).collect();
        assert_eq!(labels, vec!["Family", "Friends"]);

        let family = &summary.groups[0];
        assert_eq!(family.occupied, 2);
        let friends = &summary.groups[1];
        assert_eq!(friends.occupied, 1);
    }

    #[test]
    fn ungrouped_guests_count_as_occupied_only() {
        let summary = LayoutSummary::of(&populated_layout());

        // Dave has no group: he appears as an occupant but in no group count.
        assert_eq!(summary.occupied_seats(), 4);
        let total_grouped: usize = summary.groups.iter().map(|g| g.occupied).sum();
        assert_eq!(total_grouped, 3);
    }

    #[test]
    fn empty_layout_has_no_groups() {
        let summary = LayoutSummary::of(&Layout::initial());
        assert_eq!(summary.occupied_seats(), 0);
        assert!(summary.groups.is_empty());
        assert_eq!(summary.tables.len(), 51);
    }
}
