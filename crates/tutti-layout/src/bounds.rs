//! Bounding boxes and spacing normalization.

use crate::seat::Seat;

/// Axis-aligned bounding box of seat origins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from its corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of a set of seats, or `None` when there are none.
    pub fn of_seats<'a>(seats: impl IntoIterator<Item = &'a Seat>) -> Option<Self> {
        seats.into_iter().fold(None, |bounds, seat| {
            let point = Bounds::new(seat.x, seat.y, seat.x, seat.y);
            Some(match bounds {
                Some(bounds) => bounds.union(&point),
                None => point,
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    /// Compute union (bounding box) with another bounds.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Shift by an offset.
    pub fn translate(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(self.min_x + dx, self.min_y + dy, self.max_x + dx, self.max_y + dy)
    }
}

/// Translate seats so the minimum x and y are both zero.
pub fn trim_outer_spacing(mut seats: Vec<Seat>) -> Vec<Seat> {
    if let Some(bounds) = Bounds::of_seats(&seats) {
        for seat in &mut seats {
            seat.x -= bounds.min_x;
            seat.y -= bounds.min_y;
        }
    }
    seats
}

/// Canvas size `[width, height]` needed to draw the seats.
///
/// Seat coordinates are top-left corners, so one seat size is added on
/// each axis.
pub fn layout_dimensions(seats: &[Seat], seat_size: f64) -> [f64; 2] {
    match Bounds::of_seats(seats) {
        Some(bounds) => [bounds.width() + seat_size, bounds.height() + seat_size],
        None => [seat_size, seat_size],
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::seat::SeatId;
    use tutti_core::types::Color;

    pub(crate) fn seat_at(x: f64, y: f64) -> Seat {
        Seat {
            id: SeatId::new(&"s".into(), 0, 0),
            region: "r".into(),
            section: "s".into(),
            seat_index: 0,
            member: None,
            implicit: false,
            color: Color::SECTION_DEFAULT,
            row: 0,
            column: 0,
            x,
            y,
        }
    }

    #[test]
    fn test_bounds_of_seats() {
        let seats = [seat_at(-3.0, 4.0), seat_at(5.0, -1.0), seat_at(0.0, 0.0)];
        let bounds = Bounds::of_seats(&seats).unwrap();
        assert_eq!(bounds, Bounds::new(-3.0, -1.0, 5.0, 4.0));
        assert!((bounds.width() - 8.0).abs() < 1e-9);
        assert!((bounds.height() - 5.0).abs() < 1e-9);
        assert!((bounds.center_x() - 1.0).abs() < 1e-9);
        assert!(Bounds::of_seats(&[]).is_none());
    }

    #[test]
    fn test_trim_outer_spacing() {
        let seats = trim_outer_spacing(vec![seat_at(10.0, 20.0), seat_at(30.0, 25.0)]);
        assert_eq!((seats[0].x, seats[0].y), (0.0, 0.0));
        assert_eq!((seats[1].x, seats[1].y), (20.0, 5.0));
    }

    #[test]
    fn test_trim_negative_coordinates() {
        let seats = trim_outer_spacing(vec![seat_at(-10.0, 3.0), seat_at(4.0, -2.0)]);
        assert_eq!((seats[0].x, seats[0].y), (0.0, 5.0));
        assert_eq!((seats[1].x, seats[1].y), (14.0, 0.0));
    }

    #[test]
    fn test_trim_empty() {
        assert!(trim_outer_spacing(Vec::new()).is_empty());
    }

    #[test]
    fn test_layout_dimensions() {
        let seats = [seat_at(0.0, 0.0), seat_at(100.0, 40.0)];
        assert_eq!(layout_dimensions(&seats, 32.0), [132.0, 72.0]);
        assert_eq!(layout_dimensions(&[], 32.0), [32.0, 32.0]);
    }

    #[test]
    fn test_union_and_translate() {
        let a = Bounds::new(0.0, 0.0, 1.0, 1.0);
        let b = Bounds::new(2.0, -1.0, 3.0, 0.5);
        assert_eq!(a.union(&b), Bounds::new(0.0, -1.0, 3.0, 1.0));
        assert_eq!(a.translate(1.0, 2.0), Bounds::new(1.0, 2.0, 2.0, 3.0));
    }
}
