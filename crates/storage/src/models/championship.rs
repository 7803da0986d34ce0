use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A season-spanning event that aggregates each member's best qualifying
/// session totals with a "count best N" rule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Championship {
    pub championship_id: Uuid,
    pub name: String,
    pub slug: String,
    pub policy_year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// How many of a member's qualifying totals count towards the
    /// championship score.
    pub counted_scores: usize,
    /// Rounds whose sessions qualify. Empty means every round qualifies.
    pub eligible_rounds: Vec<Uuid>,
    pub created_at: NaiveDateTime,
}

impl Championship {
    pub fn round_qualifies(&self, round_id: Uuid) -> bool {
        self.eligible_rounds.is_empty() || self.eligible_rounds.contains(&round_id)
    }

    pub fn window_contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Championship {
        Championship {
            championship_id: Uuid::new_v4(),
            name: "Club Championship 2025".to_string(),
            slug: "club-championship-2025".to_string(),
            policy_year: 2025,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            counted_scores: 3,
            eligible_rounds: Vec::new(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_empty_eligible_rounds_means_all() {
        assert!(ladder().round_qualifies(Uuid::new_v4()));
    }

    #[test]
    fn test_restricted_eligible_rounds() {
        let round_id = Uuid::new_v4();
        let mut championship = ladder();
        championship.eligible_rounds = vec![round_id];
        assert!(championship.round_qualifies(round_id));
        assert!(!championship.round_qualifies(Uuid::new_v4()));
    }

    #[test]
    fn test_window_is_inclusive() {
        let championship = ladder();
        assert!(championship.window_contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(championship.window_contains(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!championship.window_contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }
}
