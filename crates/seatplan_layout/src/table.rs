//! Tables and the seat-count resize rule.

use crate::seat::Seat;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Minimum seat count for a regular table.
pub const MIN_SEATS: usize = 1;

/// Maximum seat count for a regular table.
pub const MAX_SEATS: usize = 10;

/// A table on the chart: a position and an ordered ring of seats.
///
/// Seat order defines the angular layout; seat `i` of an `n`-seat table sits
/// at `i * 2π / n` radians. The head table is marked `special` and is exempt
/// from seat-count adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table identity. Id 0 is reserved for the head table.
    pub id: u32,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Ordered seats; order defines angular placement.
    pub seats: Vec<Seat>,
    /// True while the operator is dragging this table. Never persisted.
    #[serde(skip)]
    pub dragging: bool,
    /// True for the fixed two-seat head table.
    pub special: bool,
}

/// Angle of seat `index` on a table with `count` seats.
fn seat_angle(index: usize, count: usize) -> f64 {
    index as f64 * TAU / count as f64
}

impl Table {
    /// Creates the special head table: exactly two seats, at angles 0 and π.
    pub fn head(id: u32, x: f64, y: f64) -> Self {
        let seats = vec![Seat::new(id, 0, 0.0), Seat::new(id, 1, PI)];
        Self {
            id,
            x,
            y,
            seats,
            dragging: false,
            special: true,
        }
    }

    /// Creates a regular table with `seat_count` evenly spaced empty seats.
    pub fn regular(id: u32, x: f64, y: f64, seat_count: usize) -> Self {
        let count = seat_count.clamp(MIN_SEATS, MAX_SEATS);
        let seats = (0..count)
            .map(|i| Seat::new(id, i, seat_angle(i, count)))
            .collect();
        Self {
            id,
            x,
            y,
            seats,
            dragging: false,
            special: false,
        }
    }

    /// Number of seats at this table.
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Looks up a seat by its derived identity.
    pub fn seat(&self, seat_id: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    /// Mutable seat lookup by derived identity.
    pub fn seat_mut(&mut self, seat_id: u32) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == seat_id)
    }

    /// Moves the table by a position delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Rebuilds the seat list with `new_count` seats.
    ///
    /// The requested count is clamped to `[MIN_SEATS, MAX_SEATS]`. Seats are
    /// re-angled evenly; name and group are copied by positional index where
    /// an old seat existed at that index, and new slots are left blank. Seat
    /// identities come out contiguous: `id * 100 + i` for every index.
    ///
    /// Special tables never resize; this is a no-op for them.
    pub fn resize_seats(&mut self, new_count: i64) {
        if self.special {
            return;
        }

        let count = new_count.clamp(MIN_SEATS as i64, MAX_SEATS as i64) as usize;
        let seats = (0..count)
            .map(|i| {
                let mut seat = Seat::new(self.id, i, seat_angle(i, count));
                if let Some(old) = self.seats.get(i) {
                    seat.name = old.name.clone();
                    seat.group = old.group;
                }
                seat
            })
            .collect();
        self.seats = seats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::Group;
    use proptest::prelude::*;

    fn table_with_guests() -> Table {
        let mut table = Table::regular(3, 0.0, 0.0, 10);
        table.seats[0].name = "Alice".into();
        table.seats[0].group = Some(Group::Family);
        table.seats[4].name = "Bob".into();
        table.seats[4].group = Some(Group::Friends);
        table.seats[9].name = "Carol".into();
        table
    }

    #[test]
    fn head_table_has_two_opposed_seats() {
        let head = Table::head(0, 400.0, 80.0);
        assert!(head.special);
        assert_eq!(head.seat_count(), 2);
        assert_eq!(head.seats[0].id, 0);
        assert_eq!(head.seats[1].id, 1);
        assert_eq!(head.seats[0].angle, 0.0);
        assert_eq!(head.seats[1].angle, PI);
    }

    #[test]
    fn regular_table_even_spacing() {
        let table = Table::regular(2, 0.0, 0.0, 8);
        assert_eq!(table.seat_count(), 8);
        for (i, seat) in table.seats.iter().enumerate() {
            assert_eq!(seat.id, 200 + i as u32);
            assert!((seat.angle - i as f64 * TAU / 8.0).abs() < 1e-12);
        }
    }

    #[test]
    fn resize_shrink_preserves_prefix() {
        let mut table = table_with_guests();
        table.resize_seats(5);

        assert_eq!(table.seat_count(), 5);
        assert_eq!(table.seats[0].name, "Alice");
        assert_eq!(table.seats[0].group, Some(Group::Family));
        assert_eq!(table.seats[4].name, "Bob");
        // Carol sat at index 9 and is gone after the shrink.
        assert!(table.seats.iter().all(|s| s.name != "Carol"));

        for (i, seat) in table.seats.iter().enumerate() {
            assert_eq!(seat.id, 300 + i as u32);
            assert!((seat.angle - i as f64 * TAU / 5.0).abs() < 1e-12);
        }
    }

    #[test]
    fn resize_grow_blanks_new_slots() {
        let mut table = Table::regular(1, 0.0, 0.0, 4);
        table.seats[2].name = "Dora".into();
        table.resize_seats(7);

        assert_eq!(table.seat_count(), 7);
        assert_eq!(table.seats[2].name, "Dora");
        for seat in &table.seats[4..] {
            assert!(!seat.is_occupied());
            assert_eq!(seat.group, None);
        }
    }

    #[test]
    fn resize_clamps_to_bounds() {
        let mut table = Table::regular(1, 0.0, 0.0, 5);
        table.resize_seats(0);
        assert_eq!(table.seat_count(), 1);

        table.resize_seats(-3);
        assert_eq!(table.seat_count(), 1);

        table.resize_seats(11);
        assert_eq!(table.seat_count(), 10);
    }

    #[test]
    fn special_table_never_resizes() {
        let mut head = Table::head(0, 0.0, 0.0);
        let before = head.clone();

        head.resize_seats(5);
        assert_eq!(head, before);

        head.resize_seats(1);
        assert_eq!(head, before);
    }

    #[test]
    fn translate_applies_delta() {
        let mut table = Table::regular(1, 100.0, 200.0, 4);
        table.translate(10.0, -25.0);
        assert_eq!(table.x, 110.0);
        assert_eq!(table.y, 175.0);
    }

    proptest! {
        #[test]
        fn resize_always_lands_in_bounds(start in 1usize..=10, requested in -20i64..30) {
            let mut table = Table::regular(4, 0.0, 0.0, start);
            table.resize_seats(requested);
            prop_assert!(table.seat_count() >= MIN_SEATS);
            prop_assert!(table.seat_count() <= MAX_SEATS);
        }

        #[test]
        fn resize_ids_contiguous(start in 1usize..=10, requested in 1i64..=10) {
            let mut table = Table::regular(4, 0.0, 0.0, start);
            table.resize_seats(requested);
            for (i, seat) in table.seats.iter().enumerate() {
                prop_assert_eq!(seat.id, 400 + i as u32);
            }
        }

        #[test]
        fn resize_preserves_shared_indices(start in 1usize..=10, requested in 1i64..=10) {
            let mut table = Table::regular(4, 0.0, 0.0, start);
            for (i, seat) in table.seats.iter_mut().enumerate() {
                seat.name = format!("guest-{i}");
                seat.group = Some(Group::ALL[i % Group::ALL.len()]);
            }
            let before = table.seats.clone();

            table.resize_seats(requested);
            let shared = before.len().min(table.seat_count());
            for i in 0..shared {
                prop_assert_eq!(&table.seats[i].name, &before[i].name);
                prop_assert_eq!(table.seats[i].group, before[i].group);
            }
            for seat in &table.seats[shared..] {
                prop_assert!(!seat.is_occupied());
            }
        }
    }
}
