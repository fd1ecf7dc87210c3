//! Error types for the Tutti engine.

use thiserror::Error;

use crate::model::{MAX_ROW_LENGTH, MAX_ROW_OFFSET};
use crate::types::{MemberId, RegionId, SectionId};

/// Top-level error type for the Tutti engine.
#[derive(Debug, Error)]
pub enum TuttiError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("No project loaded")]
    NoProject,
}

/// Errors while hydrating or validating the ensemble model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{entity} record is missing required field '{field}'{}", id_suffix(.id))]
    MissingField {
        entity: &'static str,
        id: Option<String>,
        field: &'static str,
    },

    #[error("Invalid row setting at index {index} in section {section}: {value} (expected an integer from 0 to {})", MAX_ROW_LENGTH)]
    InvalidConfiguration {
        section: SectionId,
        index: usize,
        value: String,
    },

    #[error("Invalid custom row offset {value} in section {section}: expected a row from 1 to {}", MAX_ROW_OFFSET)]
    InvalidOffset { section: SectionId, value: i64 },

    #[error("Invalid seat order {value} for member {member}: expected -1 or a seat index")]
    InvalidMemberOrder { member: MemberId, value: i64 },

    #[error("Invalid color '{value}' for section {section}")]
    InvalidColor { section: SectionId, value: String },

    #[error("Duplicate {entity} id '{id}'")]
    DuplicateId { entity: &'static str, id: String },

    #[error("Members {} share seat {order} in section {section}", .members.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", "))]
    DuplicateOrder {
        section: SectionId,
        order: u32,
        members: Vec<MemberId>,
    },

    #[error("Member {member} holds seat {order}, beyond the seats of section {section}")]
    UnseatedMember {
        section: SectionId,
        member: MemberId,
        order: u32,
    },

    #[error("Section {section} references unknown region {region}")]
    OrphanedSection { section: SectionId, region: RegionId },

    #[error("Invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn id_suffix(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" (id '{}')", id),
        None => String::new(),
    }
}

/// Errors during layout computation.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid layout option {field}: {value}")]
    InvalidOptions { field: &'static str, value: f64 },

    #[error("Invalid arc angle {angle} for region {region}: expected a value in (0, 360]")]
    InvalidArcAngle { region: RegionId, angle: f64 },
}

/// Errors during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Invalid export quality {quality}: expected 1 to 100")]
    InvalidQuality { quality: u8 },

    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Image encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Rendering failed: {reason}")]
    RenderFailed { reason: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}
