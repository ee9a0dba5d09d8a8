//! Member populations a staff roster view can enumerate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The population a roster view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterKind {
    Students,
    Teachers,
    Assistants,
}

impl RosterKind {
    /// Key under which the privileged members payload nests this population.
    pub fn collection_key(&self) -> &'static str {
        match self {
            RosterKind::Students => "students",
            RosterKind::Teachers => "teachers",
            RosterKind::Assistants => "assistants",
        }
    }

    /// Role query parameter the backend expects for this population.
    pub fn role_param(&self) -> &'static str {
        match self {
            RosterKind::Students => "student",
            RosterKind::Teachers => "teacher",
            RosterKind::Assistants => "assistant",
        }
    }
}

impl fmt::Display for RosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_key_matches_role_param_plural() {
        assert_eq!(RosterKind::Students.collection_key(), "students");
        assert_eq!(RosterKind::Students.role_param(), "student");
        assert_eq!(RosterKind::Assistants.collection_key(), "assistants");
        assert_eq!(RosterKind::Assistants.role_param(), "assistant");
    }

    #[test]
    fn test_display() {
        assert_eq!(RosterKind::Teachers.to_string(), "teachers");
    }
}
