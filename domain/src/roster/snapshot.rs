//! Published roster state.

use super::person::Person;
use serde::Serialize;

/// The externally visible result of one roster load.
///
/// Replaced wholesale when a load publishes; never mutated afterwards. Failed
/// snapshots keep the last successfully loaded people so a view can keep
/// showing them next to the error indicator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterSnapshot {
    pub generation: u64,
    pub people: Vec<Person>,
    pub failed: bool,
}

impl RosterSnapshot {
    pub fn ready(generation: u64, people: Vec<Person>) -> Self {
        Self {
            generation,
            people,
            failed: false,
        }
    }

    pub fn failed(generation: u64, people: Vec<Person>) -> Self {
        Self {
            generation,
            people,
            failed: true,
        }
    }

    /// Case-insensitive substring filter over name, email, center label and
    /// memberships. Blank terms return the whole roster. Computed lazily; the
    /// snapshot itself is untouched.
    pub fn filter(&self, term: &str) -> Vec<Person> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.people.clone();
        }
        self.people
            .iter()
            .filter(|person| person.matches(&needle))
            .cloned()
            .collect()
    }
}
