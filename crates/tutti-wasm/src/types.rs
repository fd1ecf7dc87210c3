//! JavaScript-friendly views of engine results.

use serde::Serialize;
use tutti_core::errors::ModelError;
use tutti_core::model::Member;
use tutti_core::project::Diagnostic;

/// A snapshot inconsistency, flattened for the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticJs {
    /// `orphanedSection`, `duplicateOrder` or `unseatedMember`
    pub kind: &'static str,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    pub message: String,
}

impl From<Diagnostic> for DiagnosticJs {
    fn from(diagnostic: Diagnostic) -> Self {
        let message = ModelError::from(diagnostic.clone()).to_string();
        match diagnostic {
            Diagnostic::OrphanedSection { section, region } => Self {
                kind: "orphanedSection",
                section: section.to_string(),
                region: Some(region.to_string()),
                order: None,
                members: Vec::new(),
                message,
            },
            Diagnostic::DuplicateOrder {
                section,
                order,
                members,
            } => Self {
                kind: "duplicateOrder",
                section: section.to_string(),
                region: None,
                order: Some(order),
                members: members.iter().map(|m| m.to_string()).collect(),
                message,
            },
            Diagnostic::UnseatedMember {
                section,
                member,
                order,
            } => Self {
                kind: "unseatedMember",
                section: section.to_string(),
                region: None,
                order: Some(order),
                members: vec![member.to_string()],
                message,
            },
        }
    }
}

/// A member without a seat, drawn at its stored position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeMemberJs {
    pub id: String,
    pub name: String,
    pub section: String,
    pub x: f64,
    pub y: f64,
}

impl From<&Member> for FreeMemberJs {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            section: member.section.to_string(),
            x: member.x,
            y: member.y,
        }
    }
}

/// Layout size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionsJs {
    pub width: f64,
    pub height: f64,
}
