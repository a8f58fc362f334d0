use serde::{Serialize, Deserialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub created_at: OffsetDateTime,
    pub owner_id: String,
    /// Count of every vote row referencing this poll, not stored on the poll itself.
    pub total_votes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub poll_id: Uuid,
    pub voter_id: String,
    pub option_index: i32,
}

/// Body of create and update requests. Both replace question and options wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollRequest {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub option_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    pub option_index: usize,
    pub votes: i64,
    pub percentage: f64,
}

impl Poll {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

impl VoteResult {
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}
