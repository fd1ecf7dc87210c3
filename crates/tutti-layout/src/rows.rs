//! Row generation: expanding per-section row lengths into seat slots.
//!
//! Each region row is the concatenation, in section order, of every
//! section's seats for that row. Sections that have run out of rows keep
//! contributing implicit seats once the region recedes past them, so
//! neighbouring sections stay aligned toward the back.

use tutti_core::model::{OffsetType, Section};
use tutti_core::types::RegionId;

use crate::seat::{Row, Seat, SeatId};

/// A section paired with the row lengths to generate for it.
#[derive(Debug, Clone)]
pub struct SectionRows<'a> {
    pub section: &'a Section,
    pub rows: Vec<u32>,
}

impl<'a> SectionRows<'a> {
    pub fn new(section: &'a Section, rows: Vec<u32>) -> Self {
        Self { section, rows }
    }

    /// Use the section's configured row settings unchanged.
    pub fn configured(section: &'a Section) -> Self {
        Self::new(section, section.row_settings.to_vec())
    }
}

fn prepend_empty(rows: &[u32], count: usize) -> Vec<u32> {
    let mut padded = vec![0; count];
    padded.extend_from_slice(rows);
    padded
}

/// Row lengths per section after offset padding.
///
/// LastRow sections start behind the deepest non-LastRow section.
fn apply_offsets(sections: &[SectionRows<'_>]) -> Vec<Vec<u32>> {
    let leading: Vec<Option<Vec<u32>>> = sections
        .iter()
        .map(|s| match s.section.offset_type {
            OffsetType::FirstRow => Some(s.rows.clone()),
            OffsetType::CustomRow => Some(prepend_empty(
                &s.rows,
                s.section.offset_value.saturating_sub(1) as usize,
            )),
            OffsetType::LastRow => None,
        })
        .collect();

    let front_depth = leading.iter().flatten().map(Vec::len).max().unwrap_or(0);

    sections
        .iter()
        .zip(leading)
        .map(|(s, rows)| rows.unwrap_or_else(|| prepend_empty(&s.rows, front_depth)))
        .collect()
}

/// Generate the seat rows of one region.
///
/// `sections` must already be sorted by `order`. Seats come back without
/// coordinates or occupants.
pub fn generate_rows(region: &RegionId, sections: &[SectionRows<'_>]) -> Vec<Row> {
    let padded = apply_offsets(sections);
    let row_count = padded.iter().map(Vec::len).max().unwrap_or(0);

    // Real seats emitted so far, and the last non-empty row length, per section.
    let mut placed = vec![0u32; sections.len()];
    let mut last_length: Vec<Option<u32>> = vec![None; sections.len()];
    let mut rows = Vec::with_capacity(row_count);

    for index in 0..row_count {
        let lengths: Vec<u32> = padded
            .iter()
            .map(|lengths| lengths.get(index).copied().unwrap_or(0))
            .collect();

        let receding = sections.iter().enumerate().any(|(s, entry)| {
            lengths[s] > 0
                && (last_length[s].is_some() || entry.section.offset_type == OffsetType::LastRow)
        });

        let mut row = Row::new();
        for (s, entry) in sections.iter().enumerate() {
            let (count, implicit) = match (lengths[s], last_length[s]) {
                (0, Some(previous)) if receding => (previous, true),
                (length, _) => (length, false),
            };

            row.extend((0..count as usize).map(|column| Seat {
                id: SeatId::new(&entry.section.id, index, column),
                region: region.clone(),
                section: entry.section.id.clone(),
                seat_index: placed[s] + column as u32,
                member: None,
                implicit,
                color: entry.section.color,
                row: index,
                column,
                x: 0.0,
                y: 0.0,
            }));

            if lengths[s] > 0 {
                placed[s] += lengths[s];
                last_length[s] = Some(lengths[s]);
            }
        }
        rows.push(row);
    }

    tracing::trace!(region = %region, rows = rows.len(), "generated rows");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, rows: &[u32]) -> Section {
        Section::new(id, id, "main").with_rows(rows.iter().copied())
    }

    fn generate(sections: &[Section]) -> Vec<Row> {
        let entries: Vec<_> = sections.iter().map(SectionRows::configured).collect();
        generate_rows(&"main".into(), &entries)
    }

    fn shape(row: &Row) -> Vec<(&str, bool)> {
        row.iter().map(|s| (s.section.as_str(), s.implicit)).collect()
    }

    #[test]
    fn test_single_section_rows() {
        let rows = generate(&[section("a", &[2, 4, 4])]);
        let lengths: Vec<usize> = rows.iter().map(Vec::len).collect();
        assert_eq!(lengths, [2, 4, 4]);
        assert!(rows.iter().flatten().all(|s| !s.implicit));

        let indices: Vec<u32> = rows.iter().flatten().map(|s| s.seat_index).collect();
        assert_eq!(indices, (0..10u32).collect::<Vec<_>>());
        assert_eq!(rows[1][2].id.as_str(), "a-1-2");
    }

    #[test]
    fn test_shorter_section_gets_implicit_seats() {
        let rows = generate(&[section("a", &[3, 3, 3]), section("b", &[2])]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 5);
        assert!(rows[0].iter().all(|s| !s.implicit));

        for row in &rows[1..] {
            assert_eq!(row.len(), 5);
            let padding: Vec<_> = row.iter().filter(|s| s.implicit).collect();
            assert_eq!(padding.len(), 2);
            assert!(padding.iter().all(|s| s.section.as_str() == "b"));
            assert!(padding.iter().all(|s| s.member.is_none()));
            // Numbering continues after b's two real seats
            assert_eq!(padding[0].seat_index, 2);
            assert_eq!(padding[1].seat_index, 3);
        }
    }

    #[test]
    fn test_implicit_seats_use_last_non_empty_row() {
        let rows = generate(&[section("a", &[1, 1, 1]), section("b", &[2, 3])]);
        let implicit: Vec<_> = rows[2].iter().filter(|s| s.implicit).collect();
        assert_eq!(implicit.len(), 3);
    }

    #[test]
    fn test_custom_row_offset() {
        let late = section("b", &[4]).with_offset(OffsetType::CustomRow, 3);
        let rows = generate(&[section("a", &[2]), late]);
        assert_eq!(rows.len(), 3);
        assert_eq!(shape(&rows[0]), [("a", false), ("a", false)]);
        assert!(rows[1].is_empty());
        // b has no earlier rows, so a is not padded
        assert_eq!(rows[2].len(), 4);
        assert!(rows[2].iter().all(|s| s.section.as_str() == "b" && !s.implicit));
        assert_eq!(rows[2][0].seat_index, 0);
    }

    #[test]
    fn test_last_row_section_starts_behind_everyone() {
        let back = section("perc", &[4]).with_offset(OffsetType::LastRow, 1);
        let rows = generate(&[section("a", &[3, 3]), back, section("c", &[2])]);
        assert_eq!(rows.len(), 3);

        let expected_back = [
            ("a", true),
            ("a", true),
            ("a", true),
            ("perc", false),
            ("perc", false),
            ("perc", false),
            ("perc", false),
            ("c", true),
            ("c", true),
        ];
        assert_eq!(shape(&rows[2]), expected_back);
        assert_eq!(rows[2][3].id.as_str(), "perc-2-0");
        assert_eq!(rows[2][3].seat_index, 0);
    }

    #[test]
    fn test_lone_last_row_section_is_not_shifted() {
        let back = section("perc", &[3, 3]).with_offset(OffsetType::LastRow, 1);
        let rows = generate(&[back]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_gap_rows_inside_a_section() {
        let rows = generate(&[section("a", &[3, 0, 3])]);
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2][0].seat_index, 3);
    }

    #[test]
    fn test_gap_row_padded_when_neighbour_recedes() {
        let rows = generate(&[section("a", &[3, 0, 3]), section("b", &[2, 2, 2])]);
        let padding: Vec<_> = rows[1].iter().filter(|s| s.implicit).collect();
        assert_eq!(padding.len(), 3);
        assert!(padding.iter().all(|s| s.section.as_str() == "a"));
    }

    #[test]
    fn test_no_sections() {
        assert!(generate(&[]).is_empty());
    }
}
