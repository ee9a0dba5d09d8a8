//! Groups (collections) and their owning centers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a group, normalized from a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GroupId {
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
            Repr::Int(n) => GroupId(n.to_string()),
            Repr::Str(s) => GroupId(s),
        })
    }
}

/// Owning center of a group. Only the display name is consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CenterRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// A collection owned by the calling staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: GroupId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub center: Option<CenterRef>,
}

impl GroupRef {
    /// Membership label this group contributes. Unnamed groups still need one.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("Group")
    }

    pub fn center_label(&self) -> Option<&str> {
        self.center.as_ref().and_then(|c| c.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_ref_from_json() {
        let group: GroupRef = serde_json::from_value(serde_json::json!({
            "id": 12,
            "name": "Math A",
            "center": {"id": 3, "name": "Downtown Center"}
        }))
        .unwrap();

        assert_eq!(group.id, GroupId::new("12"));
        assert_eq!(group.label(), "Math A");
        assert_eq!(group.center_label(), Some("Downtown Center"));
    }

    #[test]
    fn test_label_falls_back_for_unnamed_groups() {
        let group: GroupRef = serde_json::from_value(serde_json::json!({"id": "g-9"})).unwrap();
        assert_eq!(group.label(), "Group");
        assert_eq!(group.center_label(), None);
    }
}
