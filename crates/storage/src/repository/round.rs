use uuid::Uuid;

use crate::db::ClubDb;
use crate::dto::round::{CreateRoundRequest, RangeSpec, UpdateRoundRequest};
use crate::error::{Result, StorageError};
use crate::models::{Range, Round};

pub struct RoundRepository<'a> {
    db: &'a ClubDb,
}

impl<'a> RoundRepository<'a> {
    pub fn new(db: &'a ClubDb) -> Self {
        Self { db }
    }

    pub fn create(&self, request: &CreateRoundRequest) -> Result<Round> {
        let mut state = self.db.write();

        if state
            .rounds
            .values()
            .any(|r| r.name.eq_ignore_ascii_case(&request.name))
        {
            return Err(StorageError::constraint(format!(
                "Round {} already exists",
                request.name
            )));
        }

        let round = Round {
            round_id: Uuid::new_v4(),
            name: request.name.clone(),
            ranges: request.ranges.iter().map(build_range).collect(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        state.rounds.insert(round.round_id, round.clone());

        Ok(round)
    }

    pub fn get(&self, round_id: Uuid) -> Result<Round> {
        self.db
            .read()
            .rounds
            .get(&round_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    pub fn list(&self) -> Vec<Round> {
        let state = self.db.read();
        let mut rounds: Vec<Round> = state.rounds.values().cloned().collect();
        rounds.sort_by(|a, b| a.name.cmp(&b.name));
        rounds
    }

    /// Renames are always allowed; the range list is immutable once any
    /// session has been recorded against the round.
    pub fn update(&self, round_id: Uuid, request: &UpdateRoundRequest) -> Result<Round> {
        let mut state = self.db.write();

        if request.ranges.is_some()
            && state.sessions.values().any(|s| s.round_id == round_id)
        {
            return Err(StorageError::constraint(
                "Round has recorded sessions; its ranges can no longer change",
            ));
        }

        let round = state
            .rounds
            .get_mut(&round_id)
            .ok_or(StorageError::NotFound)?;

        if let Some(name) = &request.name {
            round.name = name.clone();
        }
        if let Some(ranges) = &request.ranges {
            round.ranges = ranges.iter().map(build_range).collect();
        }

        Ok(round.clone())
    }
}

fn build_range(spec: &RangeSpec) -> Range {
    Range {
        range_id: Uuid::new_v4(),
        distance_m: spec.distance_m,
        face_size_cm: spec.face_size_cm,
        ends_per_range: spec.ends_per_range,
        arrows_per_end: spec.arrows_per_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Session;
    use chrono::NaiveDate;

    pub(crate) fn brisbane_request() -> CreateRoundRequest {
        CreateRoundRequest {
            name: "Brisbane".to_string(),
            ranges: [(70, 122), (60, 122), (50, 80), (40, 80)]
                .into_iter()
                .map(|(distance_m, face_size_cm)| RangeSpec {
                    distance_m,
                    face_size_cm,
                    ends_per_range: 5,
                    arrows_per_end: 6,
                })
                .collect(),
        }
    }

    #[test]
    fn test_create_keeps_range_order() {
        let db = ClubDb::new();
        let repo = RoundRepository::new(&db);
        let round = repo.create(&brisbane_request()).unwrap();
        let distances: Vec<u32> = round.ranges.iter().map(|r| r.distance_m).collect();
        assert_eq!(distances, vec![70, 60, 50, 40]);
    }

    #[test]
    fn test_round_names_are_unique() {
        let db = ClubDb::new();
        let repo = RoundRepository::new(&db);
        repo.create(&brisbane_request()).unwrap();
        assert!(repo.create(&brisbane_request()).is_err());
    }

    #[test]
    fn test_ranges_freeze_once_sessions_exist() {
        let db = ClubDb::new();
        let repo = RoundRepository::new(&db);
        let round = repo.create(&brisbane_request()).unwrap();

        {
            let mut state = db.write();
            let session = Session {
                session_id: Uuid::new_v4(),
                member_id: Uuid::new_v4(),
                round_id: round.round_id,
                shoot_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
                status: crate::models::SessionStatus::Preliminary,
                ends: Vec::new(),
                created_at: chrono::Utc::now().naive_utc(),
            };
            state.sessions.insert(session.session_id, session);
        }

        let err = repo
            .update(
                round.round_id,
                &UpdateRoundRequest {
                    name: None,
                    ranges: Some(brisbane_request().ranges),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));

        // A rename is still fine.
        let renamed = repo
            .update(
                round.round_id,
                &UpdateRoundRequest {
                    name: Some("Brisbane (2025)".to_string()),
                    ranges: None,
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Brisbane (2025)");
    }
}
