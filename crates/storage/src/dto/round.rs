use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Range, Round};

/// One range in a round definition, listed longest distance first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RangeSpec {
    #[validate(range(min = 5, max = 90, message = "Distance must be between 5 and 90 metres"))]
    pub distance_m: u32,

    #[validate(range(min = 40, max = 122, message = "Face size must be between 40 and 122 cm"))]
    pub face_size_cm: u32,

    #[validate(range(min = 1, max = 12))]
    pub ends_per_range: u32,

    #[serde(default = "default_arrows_per_end")]
    #[validate(range(min = 1, max = 12))]
    pub arrows_per_end: u32,
}

fn default_arrows_per_end() -> u32 {
    6
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoundRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, message = "A round needs at least one range"))]
    #[validate(nested)]
    pub ranges: Vec<RangeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRoundRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(nested)]
    pub ranges: Option<Vec<RangeSpec>>,
}

/// List row: name plus how many ranges the round is made of.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundSummary {
    pub round_id: Uuid,
    pub name: String,
    pub range_count: usize,
}

impl From<&Round> for RoundSummary {
    fn from(round: &Round) -> Self {
        Self {
            round_id: round.round_id,
            name: round.name.clone(),
            range_count: round.ranges.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RangeResponse {
    pub range_id: Uuid,
    pub distance_m: u32,
    pub face_size_cm: u32,
    pub ends_per_range: u32,
    pub arrows_per_end: u32,
}

impl From<&Range> for RangeResponse {
    fn from(range: &Range) -> Self {
        Self {
            range_id: range.range_id,
            distance_m: range.distance_m,
            face_size_cm: range.face_size_cm,
            ends_per_range: range.ends_per_range,
            arrows_per_end: range.arrows_per_end,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundResponse {
    pub round_id: Uuid,
    pub name: String,
    pub ranges: Vec<RangeResponse>,
    pub total_ends: u32,
    pub total_arrows: u32,
    pub created_at: NaiveDateTime,
}

impl From<&Round> for RoundResponse {
    fn from(round: &Round) -> Self {
        Self {
            round_id: round.round_id,
            name: round.name.clone(),
            ranges: round.ranges.iter().map(RangeResponse::from).collect(),
            total_ends: round.total_ends(),
            total_arrows: round.total_arrows(),
            created_at: round.created_at,
        }
    }
}
