// SPDX-License-Identifier: Apache-2.0

//! Assembly, ordering and pagination of scored issues.
//!
//! Turns the raw upstream issue list into the caller-facing [`IssuesPage`]:
//! pull requests are dropped, each remaining issue is normalized and scored,
//! then the full list is sorted and a window is sliced out of it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::IssueRankError;
use crate::github::types::RawIssue;
use crate::scoring::{friendliness_score, priority_score};

/// Largest page a caller may request.
pub const MAX_LIMIT: usize = 100;

/// Page size used when the caller does not specify one.
pub const DEFAULT_LIMIT: usize = 10;

/// A normalized issue annotated with its scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct ScoredIssue {
    /// Global issue ID.
    pub id: u64,
    /// Repository-local issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Author login.
    pub user: String,
    /// Issue state.
    pub state: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
    /// Lower-cased label names in upstream order.
    pub labels: Vec<String>,
    /// Browser URL of the issue.
    pub html_url: String,
    /// Urgency score, see [`priority_score`].
    pub priority_score: f64,
    /// Approachability score, see [`friendliness_score`].
    pub friendliness_score: f64,
}

/// One window of a repository's scored issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesPage {
    /// Repository owner, as requested.
    pub owner: String,
    /// Repository name, as requested.
    pub repo: String,
    /// Number of issues before pagination.
    pub total_issues: usize,
    /// The requested window.
    pub issues: Vec<ScoredIssue>,
}

/// Field an issue listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// [`ScoredIssue::priority_score`].
    #[default]
    Priority,
    /// [`ScoredIssue::friendliness_score`].
    Friendliness,
    /// [`ScoredIssue::created_at`], compared lexically.
    CreatedAt,
}

impl SortKey {
    /// Ascending comparison of two issues by this key.
    #[must_use]
    pub fn compare(self, a: &ScoredIssue, b: &ScoredIssue) -> Ordering {
        match self {
            SortKey::Priority => a.priority_score.total_cmp(&b.priority_score),
            SortKey::Friendliness => a.friendliness_score.total_cmp(&b.friendliness_score),
            // Zero-padded UTC timestamps order lexically the same as chronologically
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }

    /// Query-string name of this key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Priority => "priority",
            SortKey::Friendliness => "friendliness",
            SortKey::CreatedAt => "created_at",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = IssueRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(SortKey::Priority),
            "friendliness" => Ok(SortKey::Friendliness),
            "created_at" => Ok(SortKey::CreatedAt),
            other => Err(IssueRankError::validation(format!(
                "sort_by must be one of priority, friendliness, created_at (got '{other}')"
            ))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Low to high.
    Asc,
    /// High to low.
    #[default]
    Desc,
}

impl Direction {
    /// Query-string name of this direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = IssueRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(IssueRankError::validation(format!(
                "direction must be asc or desc (got '{other}')"
            ))),
        }
    }
}

/// Validated listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Ordering key.
    pub sort_by: SortKey,
    /// Ordering direction.
    pub direction: Direction,
    /// Window size, `1..=MAX_LIMIT`.
    pub limit: usize,
    /// Number of issues skipped before the window.
    pub offset: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            sort_by: SortKey::default(),
            direction: Direction::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ListOptions {
    /// Validates raw query-string parameters; absent ones take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `IssueRankError::Validation` if `sort_by` or `direction` is not
    /// a known value, `limit` is not an integer in `1..=100`, or `offset` is
    /// not a non-negative integer.
    pub fn from_params(
        sort_by: Option<&str>,
        direction: Option<&str>,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> crate::Result<Self> {
        let defaults = Self::default();

        let sort_by = sort_by.map_or(Ok(defaults.sort_by), str::parse::<SortKey>)?;
        let direction = direction.map_or(Ok(defaults.direction), str::parse::<Direction>)?;

        let limit = match limit {
            None => defaults.limit,
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|n| usize::try_from(n).ok())
                .filter(|n| (1..=MAX_LIMIT).contains(n))
                .ok_or_else(|| {
                    IssueRankError::validation(format!(
                        "limit must be an integer between 1 and {MAX_LIMIT} (got '{raw}')"
                    ))
                })?,
        };

        let offset = match offset {
            None => defaults.offset,
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                IssueRankError::validation(format!(
                    "offset must be a non-negative integer (got '{raw}')"
                ))
            })?,
        };

        Ok(Self {
            sort_by,
            direction,
            limit,
            offset,
        })
    }
}

/// Normalizes and scores fetched issues, dropping pull requests.
///
/// Output order matches fetch order.
#[must_use]
pub fn assemble(raw: &[RawIssue]) -> Vec<ScoredIssue> {
    raw.iter()
        .filter(|issue| !issue.is_pull_request)
        .map(|issue| {
            ScoredIssue::builder()
                .id(issue.id)
                .number(issue.number)
                .title(issue.title.clone())
                .user(issue.login().to_string())
                .state(issue.state.clone())
                .created_at(issue.created_at.clone())
                .updated_at(issue.updated_at.clone())
                .labels(issue.label_names().map(str::to_lowercase).collect())
                .html_url(issue.html_url.clone())
                .priority_score(priority_score(issue))
                .friendliness_score(friendliness_score(issue))
                .build()
        })
        .collect()
}

/// Stable sort by `key` in `direction`.
///
/// Issues with equal keys keep their relative order in both directions.
pub fn sort_issues(issues: &mut [ScoredIssue], key: SortKey, direction: Direction) {
    match direction {
        Direction::Asc => issues.sort_by(|a, b| key.compare(a, b)),
        Direction::Desc => issues.sort_by(|a, b| key.compare(b, a)),
    }
}

/// Sorts the full list, then slices `[offset, offset + limit)` out of it.
///
/// A window running past the end is truncated; an offset past the end
/// yields an empty page.
#[must_use]
pub fn sort_and_paginate(
    owner: &str,
    repo: &str,
    mut issues: Vec<ScoredIssue>,
    options: &ListOptions,
) -> IssuesPage {
    let total_issues = issues.len();
    sort_issues(&mut issues, options.sort_by, options.direction);

    let issues = issues
        .into_iter()
        .skip(options.offset)
        .take(options.limit)
        .collect();

    IssuesPage {
        owner: owner.to_string(),
        repo: repo.to_string(),
        total_issues,
        issues,
    }
}
