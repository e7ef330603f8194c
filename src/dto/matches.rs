use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::format_timestamp,
    state::roster::{MatchRoster, MatchStatus},
};

/// Public status of a match.
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatusDto {
    /// Seats are still free.
    Open,
    /// Every seat is taken.
    Full,
    /// Cancelled by its creator.
    Cancelled,
}

impl From<MatchStatus> for MatchStatusDto {
    fn from(value: MatchStatus) -> Self {
        match value {
            MatchStatus::Open => Self::Open,
            MatchStatus::Full => Self::Full,
            MatchStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Read-only projection of a match roster.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchSummary {
    /// Identifier used in chat commands.
    pub id: String,
    /// Player who announced the match.
    pub creator: String,
    /// Date as typed by the creator.
    pub date: String,
    /// Time as typed by the creator.
    pub time: String,
    /// Chat the match belongs to.
    pub chat: String,
    /// Number of seats.
    pub capacity: usize,
    /// Lifecycle status.
    pub status: MatchStatusDto,
    /// Mutation counter; a consumer keeps the snapshot with the highest value.
    pub revision: u64,
    /// Seated players in join order.
    pub participants: Vec<String>,
    /// Waiting players in arrival order.
    pub waiting_list: Vec<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<&MatchRoster> for MatchSummary {
    fn from(roster: &MatchRoster) -> Self {
        Self {
            id: roster.id().to_owned(),
            creator: roster.creator().to_owned(),
            date: roster.date().to_owned(),
            time: roster.time().to_owned(),
            chat: roster.chat().to_owned(),
            capacity: roster.capacity(),
            status: roster.status().into(),
            revision: roster.revision(),
            participants: roster.participants().iter().cloned().collect(),
            waiting_list: roster.waiting_list().iter().cloned().collect(),
            created_at: format_timestamp(roster.created_at()),
        }
    }
}
