//! Attaching members to seats.

use std::collections::HashMap;

use tutti_core::model::Member;
use tutti_core::types::{MemberId, SectionId};

use crate::seat::Row;

/// Lookup from `(section, seat index)` to the member holding that seat.
#[derive(Debug, Clone, Default)]
pub struct MemberIndex {
    seats: HashMap<(SectionId, u32), MemberId>,
}

impl MemberIndex {
    /// Index every positioned member.
    ///
    /// When two members claim the same seat the later one wins.
    pub fn build<'a>(members: impl IntoIterator<Item = &'a Member>) -> Self {
        let mut seats = HashMap::new();
        for member in members {
            let Some(index) = member.seat_index() else {
                continue;
            };
            if let Some(previous) = seats.insert((member.section.clone(), index), member.id.clone()) {
                tracing::warn!(
                    section = %member.section,
                    seat = index,
                    shadowed = %previous,
                    member = %member.id,
                    "duplicate seat order, earlier member is hidden"
                );
            }
        }
        Self { seats }
    }

    /// Member seated at `index` in `section`.
    pub fn occupant(&self, section: &SectionId, index: u32) -> Option<&MemberId> {
        self.seats.get(&(section.clone(), index))
    }

    /// Number of seated members in `section`.
    pub fn count_in(&self, section: &SectionId) -> usize {
        self.seats.keys().filter(|(s, _)| s == section).count()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

/// Fill every real seat with the member whose order matches its seat index.
///
/// Implicit seats are always left empty.
pub fn seat_members(mut rows: Vec<Row>, index: &MemberIndex) -> Vec<Row> {
    for seat in rows.iter_mut().flatten() {
        seat.member = if seat.implicit {
            None
        } else {
            index.occupant(&seat.section, seat.seat_index).cloned()
        };
    }
    rows
}
