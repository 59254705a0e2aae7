// SPDX-License-Identifier: Apache-2.0

//! Derived issue scores.
//!
//! Two pure functions rank an issue by urgency ([`priority_score`]) and by
//! how approachable it is for a new contributor ([`friendliness_score`]).
//! Label matching is case-insensitive and independent of label order.

use std::collections::HashSet;

use crate::github::types::RawIssue;

/// Weight of the `bug` label in the priority score.
pub const PRIORITY_BUG: f64 = 3.0;
/// Weight of the `critical` / `high priority` labels in the priority score.
pub const PRIORITY_CRITICAL: f64 = 4.0;
/// Weight of the `enhancement` / `feature` labels in the priority score.
pub const PRIORITY_ENHANCEMENT: f64 = 1.0;
/// Priority contribution of each comment.
pub const PRIORITY_PER_COMMENT: f64 = 0.3;
/// Comments beyond this count add nothing to the priority score.
pub const PRIORITY_COMMENT_CAP: u64 = 10;

/// Bonus for `good first issue` / `help wanted` labels.
pub const FRIENDLY_LABEL_BONUS: f64 = 3.0;
/// Penalty for the `bug` label.
pub const FRIENDLY_BUG_PENALTY: f64 = 1.0;
/// Penalty for busy discussions.
pub const FRIENDLY_BUSY_PENALTY: f64 = 2.0;
/// Discussions with more comments than this are considered busy.
pub const FRIENDLY_BUSY_COMMENTS: u64 = 5;
/// Bonus for a well-described issue.
pub const FRIENDLY_DETAILED_BONUS: f64 = 1.0;
/// Bodies longer than this many characters count as well described.
pub const FRIENDLY_DETAILED_CHARS: usize = 300;

fn label_set(issue: &RawIssue) -> HashSet<String> {
    issue.label_names().map(str::to_lowercase).collect()
}

fn has_any(labels: &HashSet<String>, names: &[&str]) -> bool {
    names.iter().any(|name| labels.contains(*name))
}

/// Computes the priority score of an issue.
///
/// Label rules are additive, so `bug` + `critical` contributes 7.0. The
/// comment term saturates at [`PRIORITY_COMMENT_CAP`] comments.
#[must_use]
pub fn priority_score(issue: &RawIssue) -> f64 {
    let labels = label_set(issue);
    let mut score = 0.0;

    if has_any(&labels, &["bug"]) {
        score += PRIORITY_BUG;
    }
    if has_any(&labels, &["critical", "high priority"]) {
        score += PRIORITY_CRITICAL;
    }
    if has_any(&labels, &["enhancement", "feature"]) {
        score += PRIORITY_ENHANCEMENT;
    }

    #[allow(clippy::cast_precision_loss)]
    let comments = issue.comments.min(PRIORITY_COMMENT_CAP) as f64;
    score + comments * PRIORITY_PER_COMMENT
}

/// Computes the friendliness score of an issue, never below zero.
#[must_use]
pub fn friendliness_score(issue: &RawIssue) -> f64 {
    let labels = label_set(issue);
    let mut score = 0.0;

    if has_any(&labels, &["good first issue", "help wanted"]) {
        score += FRIENDLY_LABEL_BONUS;
    }
    if has_any(&labels, &["bug"]) {
        score -= FRIENDLY_BUG_PENALTY;
    }
    if issue.comments > FRIENDLY_BUSY_COMMENTS {
        score -= FRIENDLY_BUSY_PENALTY;
    }
    if issue.body().chars().count() > FRIENDLY_DETAILED_CHARS {
        score += FRIENDLY_DETAILED_BONUS;
    }

    f64::max(score, 0.0)
}
