//! Ensemble data model: regions, sections and members.
//!
//! These are the declarative records the editor mutates. The layout engine
//! only ever reads them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{Color, MemberId, RegionId, SectionId};

/// Seat order of a member that is not assigned to a seat.
pub const UNPOSITIONED: i32 = -1;

/// Default arc span of a curved region, in degrees.
pub const DEFAULT_ARC_ANGLE: f64 = 180.0;

/// Largest accepted 1-based starting row for [`OffsetType::CustomRow`].
pub const MAX_ROW_OFFSET: u32 = 256;

/// Largest accepted seat count for a single configured row.
pub const MAX_ROW_LENGTH: u32 = 1024;

/// A top-level stage area containing sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    /// Curved (arc) rows instead of a straight grid
    pub curved_layout: bool,
    /// Arc span in degrees
    pub angle: f64,
    /// Stacking position among regions
    pub order: i32,
}

impl Region {
    /// Create a curved region spanning a semicircle.
    pub fn new(id: impl Into<RegionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            curved_layout: true,
            angle: DEFAULT_ARC_ANGLE,
            order: 0,
        }
    }

    pub fn with_curved_layout(mut self, curved: bool) -> Self {
        self.curved_layout = curved;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// Where a section's rows begin relative to the region's shared row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OffsetType {
    /// Start at the region's first row.
    #[default]
    #[serde(alias = "FirstRow", alias = "first")]
    FirstRow,
    /// Start at a 1-based row given by the section's offset value.
    #[serde(alias = "CustomRow", alias = "custom")]
    CustomRow,
    /// Start behind every other section of the region.
    #[serde(alias = "LastRow", alias = "last")]
    LastRow,
}

/// A named group of performers with its own row configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub color: Color,
    pub region: RegionId,
    pub offset_type: OffsetType,
    /// 1-based starting row, only meaningful for [`OffsetType::CustomRow`]
    pub offset_value: u32,
    /// Seat count per row, front to back
    pub row_settings: SmallVec<[u32; 8]>,
    /// Position within the region, left to right
    pub order: i32,
}

impl Section {
    /// Create an empty section in the given region.
    pub fn new(
        id: impl Into<SectionId>,
        name: impl Into<String>,
        region: impl Into<RegionId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: Color::SECTION_DEFAULT,
            region: region.into(),
            offset_type: OffsetType::FirstRow,
            offset_value: 1,
            row_settings: SmallVec::new(),
            order: 0,
        }
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = u32>) -> Self {
        self.row_settings = rows.into_iter().collect();
        self
    }

    pub fn with_offset(mut self, offset_type: OffsetType, offset_value: u32) -> Self {
        self.offset_type = offset_type;
        self.offset_value = offset_value;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Configured seat capacity.
    pub fn capacity(&self) -> usize {
        self.row_settings.iter().map(|&n| n as usize).sum()
    }
}

/// A performer.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub section: SectionId,
    /// Seat index within the section, or [`UNPOSITIONED`]
    pub order: i32,
    pub notes: String,
    /// Free-floating position, only meaningful when unpositioned
    pub x: f64,
    pub y: f64,
}

impl Member {
    /// Create an unpositioned member.
    pub fn new(
        id: impl Into<MemberId>,
        name: impl Into<String>,
        section: impl Into<SectionId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            section: section.into(),
            order: UNPOSITIONED,
            notes: String::new(),
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Seat index within the section, if the member is seated.
    pub fn seat_index(&self) -> Option<u32> {
        u32::try_from(self.order).ok()
    }

    pub fn is_positioned(&self) -> bool {
        self.seat_index().is_some()
    }
}
