use serde::{Deserialize, Serialize};

use super::website::Website;

/// A named, orderable bucket of websites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A group together with its member websites, ordered by `sort_order`.
///
/// The backend serializes the group fields flattened next to `websites`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GroupWithWebsites {
    #[serde(flatten)]
    pub group: Group,
    #[serde(default)]
    pub websites: Vec<Website>,
}

/// Fields accepted when creating a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GroupDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl GroupDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: None,
            icon: None,
        }
    }
}

/// Partial group update; only `Some` fields are sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_collapsed: Option<bool>,
}

impl GroupPatch {
    /// Applies the patch to a local copy of the group.
    pub fn apply_to(&self, group: &mut Group) {
        if let Some(name) = &self.name {
            group.name = name.clone();
        }
        if let Some(color) = &self.color {
            group.color = Some(color.clone());
        }
        if let Some(icon) = &self.icon {
            group.icon = Some(icon.clone());
        }
        if let Some(collapsed) = self.is_collapsed {
            group.is_collapsed = collapsed;
        }
    }
}

/// Body of `PUT /groups/move-website`.
///
/// A `None` group moves the website out of every group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveWebsiteRequest {
    pub website_id: String,
    pub group_id: Option<String>,
    pub position: Option<i64>,
}
