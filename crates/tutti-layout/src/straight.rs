//! Straight layout: a grid of rows, each centered on the widest one.

use tutti_core::options::LayoutOptions;

use crate::seat::Row;

/// Assign grid coordinates to every seat.
///
/// Row `i` sits at `y = i * pitch`. Each row is shifted right by half the
/// difference between the widest row and its own width.
pub fn straighten_rows(mut rows: Vec<Row>, options: &LayoutOptions) -> Vec<Row> {
    let pitch = options.seat_pitch();
    let widest = rows.iter().map(Vec::len).max().unwrap_or(0) as f64 * pitch;

    for (index, row) in rows.iter_mut().enumerate() {
        let offset = (widest - row.len() as f64 * pitch) / 2.0;
        let y = index as f64 * pitch;
        for (column, seat) in row.iter_mut().enumerate() {
            seat.x = offset + column as f64 * pitch;
            seat.y = y;
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{generate_rows, SectionRows};
    use tutti_core::model::Section;

    fn rows(lengths: &[u32]) -> Vec<Row> {
        let section = Section::new("a", "A", "main").with_rows(lengths.iter().copied());
        generate_rows(&"main".into(), &[SectionRows::configured(&section)])
    }

    #[test]
    fn test_grid_positions() {
        let placed = straighten_rows(rows(&[3, 3]), &LayoutOptions::default());
        let coords: Vec<(f64, f64)> = placed.iter().flatten().map(|s| (s.x, s.y)).collect();
        assert_eq!(
            coords,
            [(0.0, 0.0), (64.0, 0.0), (128.0, 0.0), (0.0, 64.0), (64.0, 64.0), (128.0, 64.0)]
        );
    }

    #[test]
    fn test_shorter_rows_are_centered() {
        let placed = straighten_rows(rows(&[2, 4]), &LayoutOptions::default());
        // Widest row is 256 px, the two-seat row is 128 px
        assert!((placed[0][0].x - 64.0).abs() < 1e-9);
        assert!((placed[0][1].x - 128.0).abs() < 1e-9);
        assert!((placed[1][0].x - 0.0).abs() < 1e-9);

        let center = |row: &Row| (row[0].x + row[row.len() - 1].x) / 2.0;
        assert!((center(&placed[0]) - center(&placed[1])).abs() < 1e-9);
    }

    #[test]
    fn test_seat_gap_scales_pitch() {
        let options = LayoutOptions::default().with_seat_size(20.0).with_seat_gap(0.5);
        let placed = straighten_rows(rows(&[2, 2]), &options);
        assert!((placed[0][1].x - 30.0).abs() < 1e-9);
        assert!((placed[1][0].y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_row_keeps_its_depth() {
        let placed = straighten_rows(rows(&[1, 0, 1]), &LayoutOptions::default());
        assert!((placed[2][0].y - 128.0).abs() < 1e-9);
    }
}
