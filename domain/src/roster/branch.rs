//! Fetch branches: the unit of one enumeration call's output.

use super::group::GroupRef;
use super::record::RawRecord;

/// The records returned by a single network call, tagged with the collection
/// they came from so memberships can be attributed during aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchBranch {
    /// Originating group for fan-out branches; `None` for the privileged
    /// single-call enumeration.
    pub source_group: Option<GroupRef>,
    /// Center label attributed to every record in this branch. The privileged
    /// payload carries it at the top level; fan-out branches take the owning
    /// group's center.
    pub center_label: Option<String>,
    pub records: Vec<RawRecord>,
}

impl FetchBranch {
    /// Branch produced by the privileged enumeration call.
    pub fn elevated(center_label: Option<String>, records: Vec<RawRecord>) -> Self {
        Self {
            source_group: None,
            center_label,
            records,
        }
    }

    /// Branch produced by one per-group member call.
    pub fn scoped(group: GroupRef, records: Vec<RawRecord>) -> Self {
        let center_label = group.center_label().map(str::to_owned);
        Self {
            source_group: Some(group),
            center_label,
            records,
        }
    }

    /// Membership label this branch contributes, if any.
    pub fn group_label(&self) -> Option<&str> {
        self.source_group.as_ref().map(GroupRef::label)
    }
}
