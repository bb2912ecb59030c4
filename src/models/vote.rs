// src/models/vote.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single effectiveness rating on a prompt post.
/// Append-only: votes are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub user_id: String,
    pub post_id: String,

    /// 1 (didn't work) to 5 (worked perfectly).
    pub effectiveness: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
}

/// DTO for submitting a vote.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVote {
    #[validate(range(min = 1, max = 5, message = "Effectiveness must be between 1 and 5"))]
    pub effectiveness: u8,

    #[validate(length(max = 100))]
    pub use_case: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub tags: Vec<String>,
}

/// Cumulative statistics shown on a prompt post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStats {
    pub total_votes: u64,

    /// Average effectiveness, one decimal place.
    pub effectiveness: f64,

    pub worked_perfectly: u64,
    pub worked_with_tweaks: u64,
    pub partially_helpful: u64,
    pub didnt_work: u64,

    /// Share of votes rated 4 or 5, whole percent.
    pub success_rate: u64,
}

/// Per-use-case slice of the vote history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseShare {
    pub name: String,
    pub rating: f64,
    pub percentage: u64,
}
