//! Raw backend records, parsed leniently.

use super::group::CenterRef;
use super::person::PersonId;
use serde::{Deserialize, Serialize};

/// One record as an enumeration endpoint reports it.
///
/// Endpoints disagree on which scalar fields they include, so everything
/// except the id is optional. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: PersonId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub center: Option<CenterRef>,
    /// Teacher rosters report a taught-group count under either name.
    #[serde(default, alias = "taught_groups_count")]
    pub groups_count: Option<u64>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(id),
            name: None,
            email: None,
            phone: None,
            status: None,
            center: None,
            groups_count: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_center(mut self, name: impl Into<String>) -> Self {
        self.center = Some(CenterRef {
            name: Some(name.into()),
        });
        self
    }
}
