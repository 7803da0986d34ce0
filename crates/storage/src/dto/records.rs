use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::Division;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RecordsFilter {
    pub division: Option<Division>,
}

/// A member's best Confirmed total for one round.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersonalBest {
    pub round_id: Uuid,
    pub round_name: String,
    pub division: Division,
    pub shoot_date: NaiveDate,
    pub total: u32,
    pub x_count: u32,
}

/// The club's best Confirmed total for one round in one division.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClubRecord {
    pub round_id: Uuid,
    pub round_name: String,
    pub division: Division,
    pub archer: String,
    pub av_number: Option<String>,
    pub shoot_date: NaiveDate,
    pub total: u32,
    pub x_count: u32,
}
