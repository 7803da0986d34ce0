use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Championship;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateChampionshipRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(range(min = 1900, max = 2100))]
    pub policy_year: i32,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// The "best N" of the counting rule.
    #[validate(range(min = 1, max = 10))]
    pub counted_scores: usize,

    /// Round ids whose sessions qualify; empty means every round.
    #[serde(default)]
    pub eligible_rounds: Vec<Uuid>,
}

impl CreateChampionshipRequest {
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        if self.end_date < self.start_date {
            return Err("End date must be on or after start date");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChampionshipResponse {
    pub championship_id: Uuid,
    pub name: String,
    pub slug: String,
    pub policy_year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub counted_scores: usize,
    pub eligible_rounds: Vec<Uuid>,
    pub created_at: NaiveDateTime,
}

impl From<Championship> for ChampionshipResponse {
    fn from(championship: Championship) -> Self {
        Self {
            championship_id: championship.championship_id,
            name: championship.name,
            slug: championship.slug,
            policy_year: championship.policy_year,
            start_date: championship.start_date,
            end_date: championship.end_date,
            counted_scores: championship.counted_scores,
            eligible_rounds: championship.eligible_rounds,
            created_at: championship.created_at,
        }
    }
}

/// One rung of the ladder.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LadderEntry {
    pub rank: u32,
    pub tied: bool,
    pub archer: String,
    pub av_number: Option<String>,
    pub championship_score: u32,
    /// The totals that counted, highest first.
    pub counted_scores: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryStandings {
    pub category_id: Uuid,
    pub category_name: String,
    pub entries: Vec<LadderEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingsResponse {
    pub championship_id: Uuid,
    pub name: String,
    pub slug: String,
    pub counted_scores: usize,
    pub categories: Vec<CategoryStandings>,
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let is_valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--");

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_slug"))
    }
}
