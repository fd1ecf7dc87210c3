//! Seat layout engine for Tutti seating charts.
//!
//! This crate turns a declarative ensemble configuration (regions, sections,
//! row lengths, members) into concrete seat coordinates.
//!
//! # Pipeline
//!
//! For every region, in `order`:
//!
//! 1. **Capacity**: grow a section's rows until every seated member fits
//! 2. **Rows**: expand row lengths into seat slots, applying row offsets and
//!    implicit alignment seats
//! 3. **Seating**: attach members to seats by seat index
//! 4. **Mirroring**: reverse sections that sit mostly on the right-hand side
//! 5. **Placement**: curved arcs or a centered straight grid
//! 6. **Trim**: move the bounding box to the origin
//!
//! Regions are then stacked vertically and centered horizontally.
//!
//! # Example
//!
//! ```ignore
//! use tutti_core::Project;
//! use tutti_layout::{layout_project, layout_dimensions};
//!
//! let project = Project::from_json(source)?;
//! let seats = layout_project(&project)?;
//! let [width, height] = layout_dimensions(&seats, project.settings.seat_size);
//! ```

mod bounds;
mod compose;
mod curve;
mod mirror;
mod orientation;
mod rows;
mod seat;
mod seater;
mod straight;

pub use bounds::{layout_dimensions, trim_outer_spacing, Bounds};
pub use tutti_core::capacity::{ensure_enough_seats, DEFAULT_ROW_LENGTH};
pub use compose::{calculate_seat_positions, layout_project, unpositioned_members};
pub use curve::{angular_step, curve_rows};
pub use mirror::{apply_mirroring, mirror_sections, mirrored_sections};
pub use orientation::{apply_downstage_orientation, flip_stage};
pub use rows::{generate_rows, SectionRows};
pub use seat::{Row, Seat, SeatId};
pub use seater::{seat_members, MemberIndex};
pub use straight::straighten_rows;
