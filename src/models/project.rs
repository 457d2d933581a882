//! Project model.

use serde::{Deserialize, Serialize};

/// A Jira project, as returned by `GET /rest/api/3/project`.
///
/// Projects are owned by Jira and mirrored read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Numeric project ID (Jira sends it as a string).
    pub id: String,

    /// Project key, e.g. "COV".
    pub key: String,

    /// Display name.
    pub name: String,

    /// Project type (e.g., "software", "business").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type_key: Option<String>,

    /// Whether this is a team-managed (next-gen) project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplified: Option<bool>,

    /// REST URL of the project.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

impl Project {
    /// Whether the project is team-managed.
    pub fn is_team_managed(&self) -> bool {
        self.simplified.unwrap_or(false)
    }
}
