use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Competition, CompetitionEntry};

/// Request payload for creating a new competition.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Slug must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    pub base_round_id: Option<Uuid>,

    #[serde(default)]
    pub is_championship: bool,
}

impl CreateCompetitionRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        if self.end_date < self.start_date {
            return Err("End date must be on or after start date");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub competition_id: Uuid,
    pub name: String,
    pub slug: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub base_round_id: Option<Uuid>,
    pub is_championship: bool,
    pub policy_year: i32,
    pub created_at: NaiveDateTime,
}

impl From<Competition> for CompetitionResponse {
    fn from(comp: Competition) -> Self {
        let policy_year = comp.policy_year();
        Self {
            competition_id: comp.competition_id,
            name: comp.name,
            slug: comp.slug,
            start_date: comp.start_date,
            end_date: comp.end_date,
            base_round_id: comp.base_round_id,
            is_championship: comp.is_championship,
            policy_year,
            created_at: comp.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnterCompetitionRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryResponse {
    pub entry_id: Uuid,
    pub competition_id: Uuid,
    pub session_id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub final_total: Option<u32>,
    pub final_x_count: Option<u32>,
    pub rank: Option<u32>,
}

impl EntryResponse {
    pub fn new(entry: &CompetitionEntry, category_name: String) -> Self {
        Self {
            entry_id: entry.entry_id,
            competition_id: entry.competition_id,
            session_id: entry.session_id,
            category_id: entry.category_id,
            category_name,
            final_total: entry.final_total,
            final_x_count: entry.final_x_count,
            rank: entry.rank,
        }
    }
}

/// One ranked line of a category's result sheet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResultRow {
    pub rank: u32,
    pub tied: bool,
    pub archer: String,
    pub av_number: Option<String>,
    pub round_name: String,
    pub total: u32,
    pub x_count: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResults {
    pub category_id: Uuid,
    pub category_name: String,
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitionResultsResponse {
    pub competition_id: Uuid,
    pub name: String,
    pub slug: String,
    pub categories: Vec<CategoryResults>,
}

// Validation helpers

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(validate_slug("spring-championship-2025").is_ok());
        assert!(validate_slug("Spring").is_err());
        assert!(validate_slug("-spring").is_err());
        assert!(validate_slug("spring--open").is_err());
    }

    #[test]
    fn test_date_window_must_be_ordered() {
        let request = CreateCompetitionRequest {
            name: "Summer Open 2025".to_string(),
            slug: "summer-open-2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            base_round_id: None,
            is_championship: false,
        };
        assert!(request.validate_dates().is_err());
    }
}
