//! Display orientation transforms applied to finished layouts.
//!
//! The engine places row 0 (downstage) at the smallest `y`. Renderers
//! that want the audience at the bottom of the diagram flip the layout
//! here instead of recomputing it.

use crate::bounds::trim_outer_spacing;
use crate::seat::Seat;

/// Orient a layout for display.
///
/// With `downstage_top` the layout is returned unchanged. Otherwise the
/// vertical axis is negated and re-normalized, and rows are emitted back to
/// front while seats inside each row keep their order.
pub fn apply_downstage_orientation(seats: Vec<Seat>, downstage_top: bool) -> Vec<Seat> {
    if downstage_top {
        return seats;
    }

    let mut seats = seats;
    for seat in &mut seats {
        seat.y = -seat.y;
    }
    let seats = trim_outer_spacing(seats);

    let mut groups: Vec<Vec<Seat>> = Vec::new();
    for seat in seats {
        match groups.last_mut() {
            Some(group) if group[0].region == seat.region && group[0].row == seat.row => {
                group.push(seat)
            }
            _ => groups.push(vec![seat]),
        }
    }

    groups.into_iter().rev().flatten().collect()
}

/// Rotate the layout by half a turn, keeping it at the origin.
pub fn flip_stage(mut seats: Vec<Seat>) -> Vec<Seat> {
    for seat in &mut seats {
        seat.x = -seat.x;
        seat.y = -seat.y;
    }
    trim_outer_spacing(seats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::tests::seat_at;

    fn seat(row: usize, column: usize, x: f64, y: f64) -> Seat {
        let mut seat = seat_at(x, y);
        seat.row = row;
        seat.column = column;
        seat
    }

    fn layout() -> Vec<Seat> {
        vec![
            seat(0, 0, 32.0, 0.0),
            seat(0, 1, 96.0, 0.0),
            seat(1, 0, 0.0, 64.0),
            seat(1, 1, 64.0, 64.0),
            seat(1, 2, 128.0, 64.0),
        ]
    }

    #[test]
    fn test_downstage_top_is_identity() {
        assert_eq!(apply_downstage_orientation(layout(), true), layout());
    }

    #[test]
    fn test_downstage_bottom_reverses_rows() {
        let seats = apply_downstage_orientation(layout(), false);
        let order: Vec<(usize, usize)> = seats.iter().map(|s| (s.row, s.column)).collect();
        assert_eq!(order, [(1, 0), (1, 1), (1, 2), (0, 0), (0, 1)]);

        // Front row now at the bottom, back row at the origin
        assert!(seats.iter().filter(|s| s.row == 1).all(|s| s.y.abs() < 1e-9));
        assert!(seats.iter().filter(|s| s.row == 0).all(|s| (s.y - 64.0).abs() < 1e-9));
        // x is untouched
        assert!((seats[0].x - 0.0).abs() < 1e-9);
        assert!((seats[4].x - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_flip_stage() {
        let seats = flip_stage(layout());
        assert!((seats[0].x - 96.0).abs() < 1e-9);
        assert!((seats[0].y - 64.0).abs() < 1e-9);
        assert!((seats[4].x - 0.0).abs() < 1e-9);
        assert!(seats[4].y.abs() < 1e-9);
    }

    #[test]
    fn test_flip_stage_twice_restores_layout() {
        let twice = flip_stage(flip_stage(layout()));
        for (a, b) in twice.iter().zip(layout()) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_layout() {
        assert!(apply_downstage_orientation(Vec::new(), false).is_empty());
        assert!(flip_stage(Vec::new()).is_empty());
    }
}
