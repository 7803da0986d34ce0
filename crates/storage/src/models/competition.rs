use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A named event with a date window. Sessions are attached via
/// `CompetitionEntry`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Competition {
    pub competition_id: Uuid,
    pub name: String,
    pub slug: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub base_round_id: Option<Uuid>,
    pub is_championship: bool,
    pub created_at: NaiveDateTime,
}

impl Competition {
    /// The policy year governing category resolution for this event.
    pub fn policy_year(&self) -> i32 {
        self.start_date.year()
    }

    pub fn has_ended(&self, today: NaiveDate) -> bool {
        today > self.end_date
    }
}

/// Links one session to one competition under a resolved category.
///
/// `final_total` and `final_x_count` stay null until the session is Confirmed
/// and the competition is finalized; `rank` stays null until ranking runs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionEntry {
    pub entry_id: Uuid,
    pub competition_id: Uuid,
    pub session_id: Uuid,
    pub category_id: Uuid,
    pub final_total: Option<u32>,
    pub final_x_count: Option<u32>,
    pub rank: Option<u32>,
    pub created_at: NaiveDateTime,
}
