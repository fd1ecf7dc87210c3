//! Mirroring sections that sit mostly on the right-hand side.
//!
//! Seat numbering runs left to right. A section whose seats fall mostly in
//! the right half of their rows gets its seats reversed within each row,
//! so numbering starts from the outer edge on that side as well.

use std::collections::{HashMap, HashSet};

use tutti_core::types::SectionId;

use crate::seat::Row;

/// Sections with more than half of their seats in the right half of their rows.
pub fn mirrored_sections(rows: &[Row]) -> HashSet<SectionId> {
    // (seats in first half, seats in second half)
    let mut tally: HashMap<&SectionId, (usize, usize)> = HashMap::new();

    for row in rows {
        let midpoint = row.len() as f64 / 2.0;
        for (position, seat) in row.iter().enumerate() {
            let entry = tally.entry(&seat.section).or_default();
            if (position as f64) < midpoint {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }

    tally
        .into_iter()
        .filter(|(_, (first, second))| second * 2 > first + second)
        .map(|(section, _)| section.clone())
        .collect()
}

/// Reverse, in place, each row's contiguous run of seats from a mirrored section.
pub fn apply_mirroring(mut rows: Vec<Row>, mirrored: &HashSet<SectionId>) -> Vec<Row> {
    if mirrored.is_empty() {
        return rows;
    }

    for row in &mut rows {
        let mut start = 0;
        while start < row.len() {
            let section = &row[start].section;
            let end = start
                + row[start..]
                    .iter()
                    .take_while(|seat| &seat.section == section)
                    .count();
            if mirrored.contains(section) {
                row[start..end].reverse();
            }
            start = end;
        }
    }

    rows
}

/// Detect and apply mirroring in one step.
pub fn mirror_sections(rows: Vec<Row>) -> Vec<Row> {
    let mirrored = mirrored_sections(&rows);
    if !mirrored.is_empty() {
        tracing::trace!(sections = mirrored.len(), "mirroring sections");
    }
    apply_mirroring(rows, &mirrored)
}
