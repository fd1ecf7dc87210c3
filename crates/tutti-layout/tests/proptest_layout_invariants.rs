//! Property-based invariant tests for the layout engine.
//!
//! 1. Capacity always covers the member count.
//! 2. Layout is deterministic for identical input.
//! 3. Trimmed layouts start at the origin.
//! 4. The middle seat of an odd semicircle row sits on the row's centre line.
//! 5. Every positioned member within capacity is seated exactly once.

use std::collections::HashMap;

use proptest::prelude::*;
use tutti_core::model::{Member, OffsetType, Region, Section};
use tutti_core::project::Project;
use tutti_layout::{ensure_enough_seats, layout_project, trim_outer_spacing, Bounds};

const EPSILON: f64 = 1e-6;

// ── Strategies ──────────────────────────────────────────────────────────

fn row_settings_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..=12, 0..6)
}

fn offset_strategy() -> impl Strategy<Value = (OffsetType, u32)> {
    prop_oneof![
        Just((OffsetType::FirstRow, 1)),
        (1u32..=4).prop_map(|row| (OffsetType::CustomRow, row)),
        Just((OffsetType::LastRow, 1)),
    ]
}

fn section_strategy() -> impl Strategy<Value = (Vec<u32>, (OffsetType, u32), Vec<i32>)> {
    (
        row_settings_strategy(),
        offset_strategy(),
        prop::collection::vec(-1i32..30, 0..20),
    )
}

fn project_strategy() -> impl Strategy<Value = Project> {
    (
        prop::collection::vec((any::<bool>(), 30.0f64..=360.0), 1..4),
        prop::collection::vec((0usize..3, section_strategy()), 0..6),
        16.0f64..64.0,
        0.0f64..2.0,
    )
        .prop_map(|(regions, sections, seat_size, seat_gap)| {
            let mut project = Project::new();
            project.settings.seat_size = seat_size;
            project.settings.seat_gap = seat_gap;

            for (index, (curved, angle)) in regions.iter().enumerate() {
                project.add_region(
                    Region::new(format!("r{}", index), "Region")
                        .with_curved_layout(*curved)
                        .with_angle(*angle)
                        .with_order(index as i32),
                );
            }

            for (index, (region, (rows, (offset_type, offset_value), orders))) in
                sections.into_iter().enumerate()
            {
                let section_id = format!("s{}", index);
                project.add_section(
                    Section::new(
                        section_id.as_str(),
                        "Section",
                        format!("r{}", region % regions.len()),
                    )
                    .with_rows(rows)
                    .with_offset(offset_type, offset_value)
                    .with_order(index as i32),
                );
                for (m, order) in orders.into_iter().enumerate() {
                    project.add_member(
                        Member::new(format!("{}-m{}", section_id, m), "Player", section_id.as_str())
                            .with_order(order),
                    );
                }
            }
            project
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Capacity covers the member count
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn capacity_covers_members(rows in row_settings_strategy(), count in 0usize..200) {
        let grown = ensure_enough_seats(&rows, count);
        let total: usize = grown.iter().map(|&n| n as usize).sum();
        prop_assert!(total >= count, "capacity {} below {} for {:?}", total, count, rows);
        prop_assert_eq!(&grown[..rows.len()], &rows[..], "existing rows were changed");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic(project in project_strategy()) {
        let first = layout_project(&project).unwrap();
        let second = layout_project(&project).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_starts_at_origin(project in project_strategy()) {
        let seats = layout_project(&project).unwrap();
        if let Some(bounds) = Bounds::of_seats(&seats) {
            prop_assert!(bounds.min_x.abs() < EPSILON, "min x = {}", bounds.min_x);
            prop_assert!(bounds.min_y.abs() < EPSILON, "min y = {}", bounds.min_y);
        }
        prop_assert!(seats.iter().all(|s| s.x.is_finite() && s.y.is_finite()));
    }

    #[test]
    fn trim_moves_minimum_to_origin(
        points in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 1..40)
    ) {
        let mut project = Project::new();
        project
            .add_region(Region::new("r", "R").with_curved_layout(false))
            .add_section(Section::new("s", "S", "r").with_rows([points.len() as u32]));
        let mut seats = layout_project(&project).unwrap();
        for (seat, (x, y)) in seats.iter_mut().zip(&points) {
            seat.x = *x;
            seat.y = *y;
        }

        let trimmed = trim_outer_spacing(seats);
        let bounds = Bounds::of_seats(&trimmed).unwrap();
        prop_assert_eq!(bounds.min_x, 0.0);
        prop_assert_eq!(bounds.min_y, 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Curved symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn odd_row_middle_seat_is_centered(half in 0u32..15, seat_size in 8.0f64..80.0) {
        let length = 2 * half + 1;
        let mut project = Project::new();
        project.settings.seat_size = seat_size;
        project
            .add_region(Region::new("r", "R"))
            .add_section(Section::new("s", "S", "r").with_rows([length]));

        let seats = layout_project(&project).unwrap();
        let bounds = Bounds::of_seats(&seats).unwrap();
        let middle = seats.iter().find(|s| s.column == half as usize).unwrap();
        prop_assert!(
            (middle.x - bounds.center_x()).abs() < EPSILON,
            "middle seat x {} vs centre {}",
            middle.x,
            bounds.center_x()
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Positioned members are seated exactly once
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn members_within_capacity_seated_once(project in project_strategy()) {
        let seats = layout_project(&project).unwrap();

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for seat in &seats {
            if let Some(member) = &seat.member {
                prop_assert!(!seat.implicit, "implicit seat {} holds {}", seat.id, member);
                *seen.entry(member.as_str()).or_default() += 1;
            }
        }
        prop_assert!(seen.values().all(|&n| n == 1), "member seated twice: {:?}", seen);

        // Duplicate orders shadow earlier members, so check seats rather than ids.
        for section in project.sections.values() {
            if !project.regions.contains_key(&section.region) {
                continue;
            }
            let real: Vec<_> = seats
                .iter()
                .filter(|s| s.section == section.id && !s.implicit)
                .collect();
            let capacity = real.len() as u32;
            for member in project.members.values().filter(|m| m.section == section.id) {
                let Some(index) = member.seat_index() else { continue };
                if index < capacity {
                    prop_assert!(
                        real.iter().any(|s| s.seat_index == index && s.member.is_some()),
                        "seat {} of {} left empty",
                        index,
                        section.id
                    );
                }
            }
        }
    }
}
