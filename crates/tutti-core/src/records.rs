//! Stored record shapes and their conversion into typed model values.
//!
//! Records mirror what the persistence layer hands back: every field is
//! optional and row settings are raw JSON values. Conversion fails fast on
//! missing required fields and malformed row settings instead of producing
//! partially initialized entities.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ModelError;
use crate::model::{
    Member, OffsetType, Region, Section, DEFAULT_ARC_ANGLE, MAX_ROW_LENGTH, MAX_ROW_OFFSET,
    UNPOSITIONED,
};
use crate::types::{Color, SectionId};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub curved_layout: Option<bool>,
    pub angle: Option<f64>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub region: Option<String>,
    pub offset_type: Option<OffsetType>,
    pub offset_value: Option<i64>,
    pub row_settings: Option<Vec<Value>>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub section: Option<String>,
    pub order: Option<i64>,
    pub notes: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

fn required(
    value: Option<String>,
    entity: &'static str,
    id: Option<&str>,
    field: &'static str,
) -> Result<String, ModelError> {
    value.ok_or_else(|| ModelError::MissingField {
        entity,
        id: id.map(str::to_string),
        field,
    })
}

impl TryFrom<RegionRecord> for Region {
    type Error = ModelError;

    fn try_from(record: RegionRecord) -> Result<Self, Self::Error> {
        let id = required(record.id, "region", None, "id")?;
        Ok(Region {
            name: record.name.unwrap_or_default(),
            curved_layout: record.curved_layout.unwrap_or(true),
            angle: record.angle.unwrap_or(DEFAULT_ARC_ANGLE),
            order: record.order.unwrap_or(0),
            id: id.into(),
        })
    }
}

impl TryFrom<SectionRecord> for Section {
    type Error = ModelError;

    fn try_from(record: SectionRecord) -> Result<Self, Self::Error> {
        let id: SectionId = required(record.id, "section", None, "id")?.into();
        let region = required(record.region, "section", Some(id.as_str()), "region")?;

        let color = match record.color {
            Some(hex) => Color::from_hex(&hex).ok_or_else(|| ModelError::InvalidColor {
                section: id.clone(),
                value: hex,
            })?,
            None => Color::SECTION_DEFAULT,
        };

        let offset_type = record.offset_type.unwrap_or_default();
        let offset_value = match (offset_type, record.offset_value) {
            (OffsetType::CustomRow, Some(value)) => {
                u32::try_from(value)
                    .ok()
                    .filter(|v| (1..=MAX_ROW_OFFSET).contains(v))
                    .ok_or_else(|| ModelError::InvalidOffset {
                        section: id.clone(),
                        value,
                    })?
            }
            (_, Some(value)) => u32::try_from(value).unwrap_or(1).clamp(1, MAX_ROW_OFFSET),
            (_, None) => 1,
        };

        let row_settings = record
            .row_settings
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, value)| row_length(&id, index, value))
            .collect::<Result<_, _>>()?;

        Ok(Section {
            name: record.name.unwrap_or_default(),
            color,
            region: region.into(),
            offset_type,
            offset_value,
            row_settings,
            order: record.order.unwrap_or(0),
            id,
        })
    }
}

/// Parse one row-settings entry as a seat count from 0 to [`MAX_ROW_LENGTH`].
fn row_length(section: &SectionId, index: usize, value: &Value) -> Result<u32, ModelError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n <= MAX_ROW_LENGTH)
        .ok_or_else(|| ModelError::InvalidConfiguration {
            section: section.clone(),
            index,
            value: value.to_string(),
        })
}

impl TryFrom<MemberRecord> for Member {
    type Error = ModelError;

    fn try_from(record: MemberRecord) -> Result<Self, Self::Error> {
        let id = required(record.id, "member", None, "id")?;
        let section = required(record.section, "member", Some(id.as_str()), "section")?;

        let order = match record.order {
            None => UNPOSITIONED,
            Some(value) => i32::try_from(value)
                .ok()
                .filter(|&v| v >= UNPOSITIONED)
                .ok_or_else(|| ModelError::InvalidMemberOrder {
                    member: id.clone().into(),
                    value,
                })?,
        };

        Ok(Member {
            name: record.name.unwrap_or_default(),
            section: section.into(),
            order,
            notes: record.notes.unwrap_or_default(),
            x: record.x.unwrap_or(0.0),
            y: record.y.unwrap_or(0.0),
            id: id.into(),
        })
    }
}
