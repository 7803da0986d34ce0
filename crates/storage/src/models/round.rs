use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One distance/face segment of a round.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Range {
    pub range_id: Uuid,
    pub distance_m: u32,
    pub face_size_cm: u32,
    pub ends_per_range: u32,
    pub arrows_per_end: u32,
}

impl Range {
    pub fn total_arrows(&self) -> u32 {
        self.ends_per_range * self.arrows_per_end
    }
}

/// A named scoring template: an ordered list of ranges, shot longest
/// distance first. The range list is immutable once any session has been
/// recorded against the round.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Round {
    pub round_id: Uuid,
    pub name: String,
    pub ranges: Vec<Range>,
    pub created_at: NaiveDateTime,
}

impl Round {
    pub fn range(&self, range_id: Uuid) -> Option<&Range> {
        self.ranges.iter().find(|r| r.range_id == range_id)
    }

    pub fn total_ends(&self) -> u32 {
        self.ranges.iter().map(|r| r.ends_per_range).sum()
    }

    pub fn total_arrows(&self) -> u32 {
        self.ranges.iter().map(Range::total_arrows).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wa_900() -> Round {
        Round {
            round_id: Uuid::new_v4(),
            name: "WA 900".to_string(),
            ranges: [(60, 122), (50, 122), (40, 80)]
                .into_iter()
                .map(|(distance_m, face_size_cm)| Range {
                    range_id: Uuid::new_v4(),
                    distance_m,
                    face_size_cm,
                    ends_per_range: 5,
                    arrows_per_end: 6,
                })
                .collect(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_round_totals() {
        let round = wa_900();
        assert_eq!(round.total_ends(), 15);
        assert_eq!(round.total_arrows(), 90);
    }

    #[test]
    fn test_range_lookup() {
        let round = wa_900();
        let id = round.ranges[1].range_id;
        assert_eq!(round.range(id).unwrap().distance_m, 50);
        assert!(round.range(Uuid::new_v4()).is_none());
    }
}
