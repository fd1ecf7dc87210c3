//! Project snapshots: the immutable input handed to the layout engine.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::capacity::ensure_enough_seats;
use crate::errors::ModelError;
use crate::model::{Member, Region, Section};
use crate::options::LayoutOptions;
use crate::records::{MemberRecord, RegionRecord, SectionRecord};
use crate::types::{MemberId, RegionId, SectionId};

/// A consistent copy of everything the engine reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub regions: IndexMap<RegionId, Region>,
    pub sections: IndexMap<SectionId, Section>,
    pub members: IndexMap<MemberId, Member>,
    pub settings: LayoutOptions,
}

/// Serialized project snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectRecord {
    pub regions: Vec<RegionRecord>,
    pub sections: Vec<SectionRecord>,
    pub members: Vec<MemberRecord>,
    pub settings: LayoutOptions,
}

/// A non-fatal inconsistency in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Section points at a region that does not exist; it is left out of layout.
    OrphanedSection { section: SectionId, region: RegionId },
    /// Several members claim the same seat; only the last one is shown.
    DuplicateOrder {
        section: SectionId,
        order: u32,
        members: Vec<MemberId>,
    },
    /// Member's seat index lies past the section's grown capacity; it is not drawn.
    UnseatedMember {
        section: SectionId,
        member: MemberId,
        order: u32,
    },
}

impl From<Diagnostic> for ModelError {
    fn from(diagnostic: Diagnostic) -> Self {
        match diagnostic {
            Diagnostic::OrphanedSection { section, region } => {
                ModelError::OrphanedSection { section, region }
            }
            Diagnostic::DuplicateOrder {
                section,
                order,
                members,
            } => ModelError::DuplicateOrder {
                section,
                order,
                members,
            },
            Diagnostic::UnseatedMember {
                section,
                member,
                order,
            } => ModelError::UnseatedMember {
                section,
                member,
                order,
            },
        }
    }
}

/// Members of one section, split by whether they hold a seat.
#[derive(Debug, Clone, Default)]
pub struct SectionMembers<'a> {
    /// Seated members sorted by seat index
    pub positioned: Vec<&'a Member>,
    /// Free-floating members in insertion order
    pub unpositioned: Vec<&'a Member>,
}

impl Project {
    /// Create an empty project with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let record: ProjectRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }

    /// Hydrate a snapshot, rejecting malformed records and duplicate ids.
    pub fn from_record(record: ProjectRecord) -> Result<Self, ModelError> {
        let mut project = Project {
            settings: record.settings,
            ..Default::default()
        };

        for region in record.regions {
            let region = Region::try_from(region)?;
            if project.regions.contains_key(&region.id) {
                return Err(ModelError::DuplicateId {
                    entity: "region",
                    id: region.id.0,
                });
            }
            project.regions.insert(region.id.clone(), region);
        }

        for section in record.sections {
            let section = Section::try_from(section)?;
            if project.sections.contains_key(&section.id) {
                return Err(ModelError::DuplicateId {
                    entity: "section",
                    id: section.id.0,
                });
            }
            project.sections.insert(section.id.clone(), section);
        }

        for member in record.members {
            let member = Member::try_from(member)?;
            if project.members.contains_key(&member.id) {
                return Err(ModelError::DuplicateId {
                    entity: "member",
                    id: member.id.0,
                });
            }
            project.members.insert(member.id.clone(), member);
        }

        tracing::debug!(
            regions = project.regions.len(),
            sections = project.sections.len(),
            members = project.members.len(),
            "hydrated project snapshot"
        );

        Ok(project)
    }

    pub fn add_region(&mut self, region: Region) -> &mut Self {
        self.regions.insert(region.id.clone(), region);
        self
    }

    pub fn add_section(&mut self, section: Section) -> &mut Self {
        self.sections.insert(section.id.clone(), section);
        self
    }

    pub fn add_member(&mut self, member: Member) -> &mut Self {
        self.members.insert(member.id.clone(), member);
        self
    }

    /// Regions sorted by `order`, ties kept in insertion order.
    pub fn regions_in_order(&self) -> Vec<&Region> {
        let mut regions: Vec<&Region> = self.regions.values().collect();
        regions.sort_by_key(|r| r.order);
        regions
    }

    /// Sections of a region sorted by `order`, ties kept in insertion order.
    pub fn sections_in_region(&self, region: &RegionId) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self
            .sections
            .values()
            .filter(|s| &s.region == region)
            .collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Members grouped by section.
    pub fn members_by_section(&self) -> IndexMap<SectionId, SectionMembers<'_>> {
        let mut groups: IndexMap<SectionId, SectionMembers<'_>> = IndexMap::new();
        for member in self.members.values() {
            let group = groups.entry(member.section.clone()).or_default();
            if member.is_positioned() {
                group.positioned.push(member);
            } else {
                group.unpositioned.push(member);
            }
        }
        for group in groups.values_mut() {
            group.positioned.sort_by_key(|m| m.order);
        }
        groups
    }

    /// Every orphaned section, every seat claimed by more than one member,
    /// and every member whose seat index the section never reaches.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for section in self.sections.values() {
            if !self.regions.contains_key(&section.region) {
                diagnostics.push(Diagnostic::OrphanedSection {
                    section: section.id.clone(),
                    region: section.region.clone(),
                });
            }
        }

        let mut claims: BTreeMap<(&SectionId, u32), Vec<MemberId>> = BTreeMap::new();
        for member in self.members.values() {
            if let Some(index) = member.seat_index() {
                claims
                    .entry((&member.section, index))
                    .or_default()
                    .push(member.id.clone());
            }
        }
        for ((section, order), members) in claims {
            if members.len() > 1 {
                diagnostics.push(Diagnostic::DuplicateOrder {
                    section: section.clone(),
                    order,
                    members,
                });
            }
        }

        for (section_id, group) in self.members_by_section() {
            let Some(section) = self.sections.get(&section_id) else {
                continue;
            };
            let capacity: usize = ensure_enough_seats(&section.row_settings, group.positioned.len())
                .iter()
                .map(|&n| n as usize)
                .sum();
            for member in group.positioned {
                if let Some(index) = member.seat_index().filter(|&i| i as usize >= capacity) {
                    diagnostics.push(Diagnostic::UnseatedMember {
                        section: section_id.clone(),
                        member: member.id.clone(),
                        order: index,
                    });
                }
            }
        }

        diagnostics
    }

    /// Strict check for callers that enforce integrity upstream.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self.diagnostics().into_iter().next() {
            Some(diagnostic) => Err(diagnostic.into()),
            None => Ok(()),
        }
    }
}
