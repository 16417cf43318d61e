//! Seats and guest group labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A guest group label.
///
/// Groups are a fixed enumerated set; a seat either carries one of these
/// labels or none at all. The printable summary counts occupied seats per
/// group, sorted alphabetically by [`Group::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Family of the hosts.
    Family,
    /// Personal friends.
    Friends,
    /// Work colleagues.
    Colleagues,
    /// Neighbors.
    Neighbors,
    /// Everyone else.
    Other,
}

impl Group {
    /// All group labels, in declaration order.
    pub const ALL: [Group; 5] = [
        Group::Family,
        Group::Friends,
        Group::Colleagues,
        Group::Neighbors,
        Group::Other,
    ];

    /// Returns the display label for this group.
    pub fn label(&self) -> &'static str {
        match self {
            Group::Family => "Family",
            Group::Friends => "Friends",
            Group::Colleagues => "Colleagues",
            Group::Neighbors => "Neighbors",
            Group::Other => "Other",
        }
    }

    /// Parses a group from its display label.
    ///
    /// Returns `None` for unknown labels and for the empty string (an empty
    /// label means "no group").
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Family" => Some(Group::Family),
            "Friends" => Some(Group::Friends),
            "Colleagues" => Some(Group::Colleagues),
            "Neighbors" => Some(Group::Neighbors),
            "Other" => Some(Group::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single seat at a table.
///
/// Seat identity is derived, never assigned: `table_id * 100 + index` where
/// `index` is the seat's position in its table's ordered seat list. Seats are
/// rebuilt wholesale when a table's seat count changes; only the name/group
/// content at a shared index survives a resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// Derived identity: `table_id * 100 + index`.
    pub id: u32,
    /// Guest name. Empty means the seat is unassigned.
    #[serde(default)]
    pub name: String,
    /// Guest group, if any.
    #[serde(default)]
    pub group: Option<Group>,
    /// Angular position around the table, in radians.
    pub angle: f64,
}

impl Seat {
    /// Creates an empty seat for the given table and index.
    pub fn new(table_id: u32, index: usize, angle: f64) -> Self {
        Self {
            id: table_id * 100 + index as u32,
            name: String::new(),
            group: None,
            angle,
        }
    }

    /// Returns true if a guest name has been assigned.
    pub fn is_occupied(&self) -> bool {
        !self.name.is_empty()
    }
}
