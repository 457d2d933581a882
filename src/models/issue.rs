//! Issue model and search envelope.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::adf;
use crate::pagination::Page;

/// A Jira issue, restricted to the fields the linter requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Numeric issue ID (Jira sends it as a string).
    pub id: String,

    /// Issue key, e.g. "COV-12".
    pub key: String,

    /// REST URL of the issue.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,

    /// Requested fields.
    #[serde(default)]
    pub fields: IssueFields,
}

/// Fields of an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,

    /// Plain string or an ADF document.
    #[serde(default)]
    pub description: Option<serde_json::Value>,

    #[serde(default)]
    pub status: Option<NamedField>,

    #[serde(rename = "issuetype", default)]
    pub issue_type: Option<NamedField>,

    #[serde(default, with = "jira_time")]
    pub created: Option<DateTime<FixedOffset>>,

    #[serde(default, with = "jira_time")]
    pub updated: Option<DateTime<FixedOffset>>,
}

/// A field Jira models as an object with a display name (status, issue type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Issue {
    /// Issue summary, or an empty string when absent.
    pub fn summary(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or_default()
    }

    /// Description rendered to plain text. Missing descriptions are empty.
    pub fn description_text(&self) -> String {
        self.fields
            .description
            .as_ref()
            .map(adf::description_to_text)
            .unwrap_or_default()
    }

    /// Workflow status name (e.g. "To Do").
    pub fn status_name(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Issue type name (e.g. "Story").
    pub fn issue_type_name(&self) -> Option<&str> {
        self.fields.issue_type.as_ref().map(|t| t.name.as_str())
    }
}

/// Response body of `GET /rest/api/3/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSearch {
    #[serde(default)]
    pub start_at: Option<u64>,
    #[serde(default)]
    pub max_results: Option<u64>,
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl From<IssueSearch> for Page<Issue> {
    fn from(search: IssueSearch) -> Self {
        Page::new(
            search.issues,
            search.total,
            search.start_at.unwrap_or(0),
            search.max_results.unwrap_or(0),
        )
    }
}

/// Jira timestamps look like `2020-04-01T10:15:30.000+0200`, which is not
/// RFC 3339 (no colon in the offset).
mod jira_time {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

    pub fn serialize<S>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_str(&s, FORMAT)
                .or_else(|_| DateTime::parse_from_rfc3339(&s))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
