//! Curved layout: rows placed on concentric arcs around the podium.
//!
//! Row `i` sits on an arc of radius `r0 + i * pitch`, where `r0` is half the
//! straight width of the first row. Seats are spread evenly across the
//! region's arc angle and the arc is rotated so it is symmetric about the
//! vertical axis through its centre.

use std::f64::consts::PI;

use glam::{DMat2, DVec2};
use tutti_core::options::LayoutOptions;

use crate::seat::Row;

/// Angle between neighbouring seats of a row of `row_length` seats.
///
/// Rows with fewer than two seats have no step.
pub fn angular_step(row_length: usize, arc_degrees: f64) -> f64 {
    if row_length < 2 {
        return 0.0;
    }
    PI / ((row_length - 1) as f64 / (arc_degrees / 180.0))
}

/// Assign arc coordinates to every seat.
///
/// The parametric walk runs counter-clockwise from the right, so columns are
/// assigned in reverse to keep seat order left to right. Coordinates are
/// shifted right by the outermost radius so no seat lies left of `x = 0`.
pub fn curve_rows(mut rows: Vec<Row>, arc_degrees: f64, options: &LayoutOptions) -> Vec<Row> {
    let pitch = options.seat_pitch();
    let first_row_radius = rows.first().map_or(0.0, |row| row.len() as f64 * pitch / 2.0);
    let arc = arc_degrees.to_radians();
    let centering = DMat2::from_angle(((180.0 - arc_degrees) / 2.0).to_radians());

    let mut outer_radius: f64 = 0.0;
    for (index, row) in rows.iter_mut().enumerate() {
        if row.is_empty() {
            continue;
        }
        let radius = first_row_radius + index as f64 * pitch;
        outer_radius = outer_radius.max(radius);

        let length = row.len();
        let step = angular_step(length, arc_degrees);
        for (column, seat) in row.iter_mut().enumerate() {
            let theta = if length == 1 {
                arc / 2.0
            } else {
                step * (length - 1 - column) as f64
            };
            let point = centering * (DVec2::new(theta.cos(), theta.sin()) * radius);
            seat.x = point.x;
            seat.y = point.y;
        }
    }

    for seat in rows.iter_mut().flatten() {
        seat.x += outer_radius;
    }

    rows
}
