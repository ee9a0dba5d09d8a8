//! Person identity and the deduplicated roster entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a person.
///
/// Backend payloads carry ids as JSON numbers or strings depending on the
/// endpoint; both normalize to the same key so the same person collapses to
/// one entry regardless of which collection reported them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Str(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Int(n) => PersonId(n.to_string()),
            Repr::Str(s) => PersonId(s),
        })
    }
}

/// One deduplicated roster entry.
///
/// Scalar fields are first-writer-wins across branches; `memberships` grows by
/// one label per contributing group, in branch order, without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub center_label: String,
    pub status_hint: String,
    /// Labels of the groups this person was seen in.
    pub memberships: Vec<String>,
    /// Taught/attended group count, when the backend reports one.
    pub groups_count: Option<u64>,
}

impl Person {
    /// Append a membership label unless it is already present.
    pub fn add_membership(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.memberships.contains(&label) {
            self.memberships.push(label);
        }
    }

    /// Substring match over name, email, center label and memberships.
    ///
    /// `needle` must already be lowercased; blank-term handling lives in
    /// [`super::snapshot::RosterSnapshot::filter`].
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.center_label.to_lowercase().contains(needle)
            || self.memberships.join(", ").to_lowercase().contains(needle)
    }
}
