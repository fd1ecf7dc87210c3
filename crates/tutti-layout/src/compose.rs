//! Region composition: the full layout pipeline.

use std::collections::HashMap;

use indexmap::IndexMap;
use tutti_core::capacity::ensure_enough_seats;
use tutti_core::errors::LayoutError;
use tutti_core::model::{Member, Region, Section};
use tutti_core::options::LayoutOptions;
use tutti_core::project::Project;
use tutti_core::types::{MemberId, RegionId, SectionId};

use crate::bounds::{trim_outer_spacing, Bounds};
use crate::curve::curve_rows;
use crate::mirror::mirror_sections;
use crate::rows::{generate_rows, SectionRows};
use crate::seat::Seat;
use crate::seater::{seat_members, MemberIndex};
use crate::straight::straighten_rows;

/// Lay out every region and merge the results into one seat list.
///
/// Regions are processed by `order` and stacked top to bottom with a gap of
/// two seat sizes. When there is more than one region, each is centered
/// horizontally on the widest. Sections whose region does not exist are
/// left out.
#[tracing::instrument(skip_all, fields(regions = regions.len(), sections = sections.len()))]
pub fn calculate_seat_positions(
    regions: &IndexMap<RegionId, Region>,
    sections: &IndexMap<SectionId, Section>,
    members: &IndexMap<MemberId, Member>,
    options: &LayoutOptions,
) -> Result<Vec<Seat>, LayoutError> {
    options.validate()?;
    for region in regions.values().filter(|r| r.curved_layout) {
        if !(region.angle > 0.0 && region.angle <= 360.0) {
            return Err(LayoutError::InvalidArcAngle {
                region: region.id.clone(),
                angle: region.angle,
            });
        }
    }

    for section in sections.values() {
        if !regions.contains_key(&section.region) {
            tracing::warn!(
                section = %section.id,
                region = %section.region,
                "section references a missing region, skipping"
            );
        }
    }

    let index = MemberIndex::build(members.values());
    let mut positioned: HashMap<&SectionId, usize> = HashMap::new();
    for member in members.values().filter(|m| m.is_positioned()) {
        *positioned.entry(&member.section).or_default() += 1;
    }

    let mut ordered: Vec<&Region> = regions.values().collect();
    ordered.sort_by_key(|r| r.order);

    let mut placed: Vec<(Vec<Seat>, Bounds)> = Vec::new();
    for region in ordered {
        let mut region_sections: Vec<&Section> = sections
            .values()
            .filter(|s| s.region == region.id)
            .collect();
        region_sections.sort_by_key(|s| s.order);

        let seats = layout_region(region, &region_sections, &positioned, &index, options);
        let Some(bounds) = Bounds::of_seats(&seats) else {
            tracing::debug!(region = %region.id, "region has no seats, skipping");
            continue;
        };
        tracing::debug!(
            region = %region.id,
            sections = region_sections.len(),
            seats = seats.len(),
            "laid out region"
        );
        placed.push((seats, bounds));
    }

    Ok(stack_regions(placed, options))
}

/// Run the per-region pipeline: capacity, rows, seating, mirroring,
/// placement, trim.
fn layout_region(
    region: &Region,
    sections: &[&Section],
    positioned: &HashMap<&SectionId, usize>,
    index: &MemberIndex,
    options: &LayoutOptions,
) -> Vec<Seat> {
    let entries: Vec<SectionRows<'_>> = sections
        .iter()
        .map(|section| {
            let count = positioned.get(&section.id).copied().unwrap_or(0);
            SectionRows::new(section, ensure_enough_seats(&section.row_settings, count))
        })
        .collect();

    let rows = generate_rows(&region.id, &entries);
    let rows = seat_members(rows, index);
    let rows = mirror_sections(rows);
    let rows = if region.curved_layout {
        curve_rows(rows, region.angle, options)
    } else {
        straighten_rows(rows, options)
    };

    trim_outer_spacing(rows.into_iter().flatten().collect())
}

/// Stack trimmed regions vertically and center them on the widest.
fn stack_regions(placed: Vec<(Vec<Seat>, Bounds)>, options: &LayoutOptions) -> Vec<Seat> {
    let center = placed.len() > 1;
    let mut overall: Option<Bounds> = None;
    let mut shifted: Vec<(Vec<Seat>, Bounds)> = Vec::with_capacity(placed.len());

    for (mut seats, bounds) in placed {
        let dy = match overall {
            Some(overall) => overall.max_y + options.region_gap(),
            None => 0.0,
        };
        for seat in &mut seats {
            seat.y += dy;
        }
        let bounds = bounds.translate(0.0, dy);
        overall = Some(match overall {
            Some(overall) => overall.union(&bounds),
            None => bounds,
        });
        shifted.push((seats, bounds));
    }

    let overall_width = overall.map_or(0.0, |b| b.width());
    shifted
        .into_iter()
        .flat_map(|(mut seats, bounds)| {
            if center {
                let dx = (overall_width - bounds.width()) / 2.0;
                for seat in &mut seats {
                    seat.x += dx;
                }
            }
            seats
        })
        .collect()
}

/// Lay out a project snapshot with its own settings.
pub fn layout_project(project: &Project) -> Result<Vec<Seat>, LayoutError> {
    calculate_seat_positions(
        &project.regions,
        &project.sections,
        &project.members,
        &project.settings,
    )
}

/// Free-floating members (`order = -1`) in insertion order.
pub fn unpositioned_members(project: &Project) -> Vec<&Member> {
    project
        .members
        .values()
        .filter(|m| !m.is_positioned())
        .collect()
}
