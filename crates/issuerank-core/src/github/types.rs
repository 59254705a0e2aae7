// SPDX-License-Identifier: Apache-2.0

//! Wire types for the GitHub issue listing endpoint.
//!
//! Only the fields the scoring pipeline consumes are modelled; everything
//! else in the upstream payload is ignored during deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// An issue (or pull request) as returned by `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIssue {
    /// Global issue ID.
    pub id: u64,
    /// Repository-local issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue author. `null` for deleted accounts.
    #[serde(default)]
    pub user: Option<RawUser>,
    /// Issue state (`open` or `closed`).
    pub state: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
    /// Labels attached to the issue, in upstream order.
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    /// Browser URL of the issue.
    pub html_url: String,
    /// Number of comments.
    #[serde(default)]
    pub comments: u64,
    /// Markdown body.
    #[serde(default)]
    pub body: Option<String>,
    /// Whether the upstream record carried a `pull_request` key.
    #[serde(
        default,
        rename = "pull_request",
        deserialize_with = "key_present",
        skip_serializing_if = "std::ops::Not::not",
        serialize_with = "serialize_marker"
    )]
    pub is_pull_request: bool,
}

/// Author of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    /// GitHub login.
    pub login: String,
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLabel {
    /// Label name as written by the repository maintainers.
    pub name: String,
}

impl RawIssue {
    /// Author login, or an empty string when the account no longer exists.
    #[must_use]
    pub fn login(&self) -> &str {
        self.user.as_ref().map_or("", |u| u.login.as_str())
    }

    /// Issue body, or an empty string when absent.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Iterates over label names in upstream order.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}

/// Any value under the key (even `null`) marks the record as a pull request.
fn key_present<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_marker<S>(_: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_unit_struct("PullRequest")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_issue() -> serde_json::Value {
        json!({
            "id": 1,
            "number": 7,
            "title": "Crash on start",
            "user": {"login": "octocat"},
            "state": "open",
            "created_at": "2023-01-01T10:00:00Z",
            "updated_at": "2023-01-02T10:00:00Z",
            "labels": [{"name": "bug", "color": "d73a4a"}],
            "html_url": "https://github.com/o/r/issues/7",
            "comments": 2,
            "body": "It crashes."
        })
    }

    #[test]
    fn deserializes_consumed_fields() {
        let issue: RawIssue = serde_json::from_value(base_issue()).unwrap();
        assert_eq!(issue.id, 1);
        assert_eq!(issue.number, 7);
        assert_eq!(issue.login(), "octocat");
        assert_eq!(issue.label_names().collect::<Vec<_>>(), vec!["bug"]);
        assert_eq!(issue.comments, 2);
        assert_eq!(issue.body(), "It crashes.");
        assert!(!issue.is_pull_request);
    }

    #[test]
    fn missing_optional_fields_default() {
        let mut value = base_issue();
        let obj = value.as_object_mut().unwrap();
        obj.remove("comments");
        obj.remove("body");
        obj.remove("labels");
        let issue: RawIssue = serde_json::from_value(value).unwrap();
        assert_eq!(issue.comments, 0);
        assert_eq!(issue.body(), "");
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn null_body_and_user_default_to_empty() {
        let mut value = base_issue();
        value["body"] = serde_json::Value::Null;
        value["user"] = serde_json::Value::Null;
        let issue: RawIssue = serde_json::from_value(value).unwrap();
        assert_eq!(issue.body(), "");
        assert_eq!(issue.login(), "");
    }

    #[test]
    fn pull_request_key_marks_record() {
        let mut value = base_issue();
        value["pull_request"] = json!({"url": "https://api.github.com/repos/o/r/pulls/7"});
        let issue: RawIssue = serde_json::from_value(value).unwrap();
        assert!(issue.is_pull_request);
    }

    #[test]
    fn null_pull_request_key_still_marks_record() {
        let mut value = base_issue();
        value["pull_request"] = serde_json::Value::Null;
        let issue: RawIssue = serde_json::from_value(value).unwrap();
        assert!(issue.is_pull_request);
    }

    #[test]
    fn pull_request_marker_survives_cache_serialization() {
        let mut value = base_issue();
        value["pull_request"] = json!({});
        let issue: RawIssue = serde_json::from_value(value).unwrap();

        let json = serde_json::to_string(&issue).unwrap();
        let parsed: RawIssue = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_pull_request);

        let plain: RawIssue = serde_json::from_value(base_issue()).unwrap();
        let json = serde_json::to_string(&plain).unwrap();
        assert!(!json.contains("pull_request"));
    }
}
