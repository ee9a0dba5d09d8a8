//! Deterministic merge of fetch branches into a deduplicated roster.

use super::branch::FetchBranch;
use super::person::{Person, PersonId};
use super::record::RawRecord;
use std::collections::HashMap;

/// Status assigned when a record carries none. Fan-out branches always use it
/// because the per-group endpoint reports no status.
const DEFAULT_STATUS: &str = "active";

/// Merge branches into a roster.
///
/// Branches must already be in request order; the merge iterates them as
/// given, so the output depends only on that order, never on completion
/// timing. The first record to introduce an identity fixes its scalar fields;
/// later sightings only accumulate membership labels. Output order is order of
/// first appearance across branches.
pub fn aggregate(branches: &[FetchBranch]) -> Vec<Person> {
    let mut order: Vec<PersonId> = Vec::new();
    let mut merged: HashMap<PersonId, Person> = HashMap::new();

    for branch in branches {
        for record in &branch.records {
            if let Some(person) = merged.get_mut(&record.id) {
                if let Some(label) = branch.group_label() {
                    person.add_membership(label);
                }
            } else {
                order.push(record.id.clone());
                merged.insert(record.id.clone(), person_from(branch, record));
            }
        }
    }

    order.into_iter().filter_map(|id| merged.remove(&id)).collect()
}

fn person_from(branch: &FetchBranch, record: &RawRecord) -> Person {
    let status_hint = if branch.source_group.is_some() {
        DEFAULT_STATUS.to_string()
    } else {
        record
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string())
    };

    let center_label = branch
        .center_label
        .clone()
        .or_else(|| record.center.as_ref().and_then(|c| c.name.clone()))
        .unwrap_or_default();

    Person {
        id: record.id.clone(),
        name: record.name.clone().unwrap_or_default(),
        email: record.email.clone().unwrap_or_default(),
        phone: record.phone.clone().unwrap_or_default(),
        center_label,
        status_hint,
        memberships: branch
            .group_label()
            .map(|label| vec![label.to_string()])
            .unwrap_or_default(),
        groups_count: record.groups_count,
    }
}
