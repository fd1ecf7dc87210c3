//! Core types, data model, and utilities for the Tutti seating engine.
//!
//! This crate provides the foundational types used across all other tutti crates:
//! - Ensemble data model (regions, sections, members) and section capacity
//! - Value types (typed identifiers, colors)
//! - Layout options
//! - Record hydration and snapshot diagnostics
//! - Error types

pub mod capacity;
pub mod errors;
pub mod model;
pub mod options;
pub mod project;
pub mod records;
pub mod types;

pub use capacity::{ensure_enough_seats, DEFAULT_ROW_LENGTH};
pub use errors::*;
pub use model::*;
pub use options::*;
pub use project::*;
pub use types::*;
