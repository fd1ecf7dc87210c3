//! Seat records produced by the engine.

use std::fmt;

use serde::Serialize;
use tutti_core::types::{Color, MemberId, RegionId, SectionId};

/// Stable seat identifier derived from section, row and column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Build the id for a section's `column`-th seat in region row `row`.
    pub fn new(section: &SectionId, row: usize, column: usize) -> Self {
        SeatId(format!("{}-{}-{}", section, row, column))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single seat slot.
///
/// Seats are recomputed on every layout call and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: SeatId,
    pub region: RegionId,
    pub section: SectionId,
    /// Logical seat number within the section
    pub seat_index: u32,
    /// Occupant, if any
    pub member: Option<MemberId>,
    /// Alignment padding that can never hold an occupant
    pub implicit: bool,
    pub color: Color,
    /// Row index within the region, front to back
    pub row: usize,
    /// Column within the section's part of the row
    pub column: usize,
    /// Top-left corner in pixels
    pub x: f64,
    pub y: f64,
}

impl Seat {
    pub fn is_occupied(&self) -> bool {
        self.member.is_some()
    }
}

/// One row of seats across all sections of a region, left to right.
pub type Row = Vec<Seat>;
