use std::collections::HashMap;

use uuid::Uuid;

use crate::db::ClubDb;
use crate::dto::championship::{
    CategoryStandings, CreateChampionshipRequest, LadderEntry, StandingsResponse,
};
use crate::error::{Result, StorageError};
use crate::models::{Championship, SessionStatus};
use crate::services::category_resolution::resolve_category;
use crate::services::championship::compute_standings;
use crate::services::scoring::aggregate_session;

pub struct ChampionshipRepository<'a> {
    db: &'a ClubDb,
}

impl<'a> ChampionshipRepository<'a> {
    pub fn new(db: &'a ClubDb) -> Self {
        Self { db }
    }

    pub fn create(&self, request: &CreateChampionshipRequest) -> Result<Championship> {
        let mut state = self.db.write();

        if state.championships.values().any(|c| c.slug == request.slug) {
            return Err(StorageError::constraint(format!(
                "Slug {} already exists",
                request.slug
            )));
        }
        for round_id in &request.eligible_rounds {
            if !state.rounds.contains_key(round_id) {
                return Err(StorageError::NotFound);
            }
        }

        let championship = Championship {
            championship_id: Uuid::new_v4(),
            name: request.name.clone(),
            slug: request.slug.clone(),
            policy_year: request.policy_year,
            start_date: request.start_date,
            end_date: request.end_date,
            counted_scores: request.counted_scores,
            eligible_rounds: request.eligible_rounds.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        state
            .championships
            .insert(championship.championship_id, championship.clone());

        Ok(championship)
    }

    pub fn find_by_slug(&self, slug: &str) -> Result<Championship> {
        self.db
            .read()
            .championships
            .values()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    pub fn list(&self) -> Vec<Championship> {
        let state = self.db.read();
        let mut championships: Vec<Championship> =
            state.championships.values().cloned().collect();
        championships.sort_by(|a, b| a.name.cmp(&b.name));
        championships
    }

    /// The ladder: every Confirmed session in the window on an eligible
    /// round contributes a total; each member's best `counted_scores` totals
    /// sum to their championship score, ranked per category.
    pub fn standings(&self, slug: &str) -> Result<StandingsResponse> {
        let state = self.db.read();

        let championship = state
            .championships
            .values()
            .find(|c| c.slug == slug)
            .ok_or(StorageError::NotFound)?;

        // category -> member -> qualifying totals
        let mut totals: HashMap<Uuid, HashMap<Uuid, Vec<u32>>> = HashMap::new();

        for session in state.sessions.values() {
            if session.status != SessionStatus::Confirmed
                || !championship.window_contains(session.shoot_date)
                || !championship.round_qualifies(session.round_id)
            {
                continue;
            }
            let member = state
                .members
                .get(&session.member_id)
                .ok_or(StorageError::NotFound)?;
            let division = member.division.ok_or_else(|| {
                StorageError::constraint("Session member has no division")
            })?;
            let round = state
                .rounds
                .get(&session.round_id)
                .ok_or(StorageError::NotFound)?;

            let category = resolve_category(
                &state.categories,
                member.birth_year,
                member.gender,
                division,
                championship.policy_year,
            )?;

            totals
                .entry(category.category_id)
                .or_default()
                .entry(member.member_id)
                .or_insert_with(Vec::new)
                .push(aggregate_session(session, round).total);
        }

        let mut categories = Vec::with_capacity(totals.len());
        for (category_id, by_member) in totals {
            let category = state
                .categories
                .iter()
                .find(|c| c.category_id == category_id)
                .ok_or(StorageError::NotFound)?;

            let mut member_totals: Vec<(Uuid, Vec<u32>)> = by_member.into_iter().collect();
            // Stable input order so that tied members list alphabetically.
            member_totals.sort_by(|(a, _), (b, _)| {
                let name_a = state.members.get(a).map(|m| m.full_name.as_str());
                let name_b = state.members.get(b).map(|m| m.full_name.as_str());
                name_a.cmp(&name_b)
            });

            let mut entries = Vec::new();
            for standing in compute_standings(member_totals, championship.counted_scores) {
                let member = state
                    .members
                    .get(&standing.member_id)
                    .ok_or(StorageError::NotFound)?;
                entries.push(LadderEntry {
                    rank: standing.rank,
                    tied: standing.tied,
                    archer: member.full_name.clone(),
                    av_number: member.av_number.clone(),
                    championship_score: standing.score,
                    counted_scores: standing.counted,
                });
            }

            categories.push(CategoryStandings {
                category_id,
                category_name: category.name(),
                entries,
            });
        }
        categories.sort_by(|a, b| a.category_name.cmp(&b.category_name));

        Ok(StandingsResponse {
            championship_id: championship.championship_id,
            name: championship.name.clone(),
            slug: championship.slug.clone(),
            counted_scores: championship.counted_scores,
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::category::{AgeClassSpec, CategorySpec, ConfigureCategoriesRequest};
    use crate::dto::member::CreateMemberRequest;
    use crate::dto::round::{CreateRoundRequest, RangeSpec};
    use crate::dto::session::{CreateSessionRequest, RecordEndRequest, StatusChangeRequest};
    use crate::models::{ArrowValue, Division, Gender};
    use crate::repository::category::CategoryRepository;
    use crate::repository::member::MemberRepository;
    use crate::repository::round::RoundRepository;
    use crate::repository::session::SessionRepository;
    use chrono::NaiveDate;

    struct Fixture {
        db: ClubDb,
        round_id: Uuid,
        range_id: Uuid,
    }

    impl Fixture {
        fn new(counted_scores: usize) -> Self {
            let db = ClubDb::new();

            CategoryRepository::new(&db)
                .configure(&ConfigureCategoriesRequest {
                    policy_year: 2025,
                    categories: vec![CategorySpec {
                        age_class: AgeClassSpec {
                            code: "Open".to_string(),
                            min_birth_year: 1950,
                            max_birth_year: 2011,
                        },
                        gender: Gender::Male,
                        division: Division::Recurve,
                    }],
                })
                .unwrap();

            let round = RoundRepository::new(&db)
                .create(&CreateRoundRequest {
                    name: "Canberra".to_string(),
                    ranges: vec![RangeSpec {
                        distance_m: 90,
                        face_size_cm: 122,
                        ends_per_range: 6,
                        arrows_per_end: 6,
                    }],
                })
                .unwrap();

            ChampionshipRepository::new(&db)
                .create(&CreateChampionshipRequest {
                    name: "Club Championship 2025".to_string(),
                    slug: "club-championship-2025".to_string(),
                    policy_year: 2025,
                    start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                    counted_scores,
                    eligible_rounds: Vec::new(),
                })
                .unwrap();

            Self {
                db,
                round_id: round.round_id,
                range_id: round.ranges[0].range_id,
            }
        }

        fn member(&self, name: &str, av: &str) -> Uuid {
            MemberRepository::new(&self.db)
                .create(&CreateMemberRequest {
                    full_name: name.to_string(),
                    av_number: Some(av.to_string()),
                    birth_year: 1990,
                    gender: Gender::Male,
                    division: Some(Division::Recurve),
                    is_recorder: false,
                })
                .unwrap()
                .member_id
        }

        /// One confirmed session whose single end repeats `token` six times.
        fn confirmed_session(&self, member_id: Uuid, month: u32, token: &str) {
            let sessions = SessionRepository::new(&self.db);
            let session = sessions
                .create(&CreateSessionRequest {
                    member_id,
                    round_id: self.round_id,
                    shoot_date: NaiveDate::from_ymd_opt(2025, month, 15).unwrap(),
                })
                .unwrap();
            sessions
                .record_end(
                    session.session_id,
                    &RecordEndRequest {
                        range_id: self.range_id,
                        arrows: vec![ArrowValue::from_token(token).unwrap(); 6],
                    },
                )
                .unwrap();
            sessions
                .set_status(
                    session.session_id,
                    &StatusChangeRequest {
                        status: SessionStatus::Confirmed,
                        changed_by: None,
                    },
                )
                .unwrap();
        }
    }

    #[test]
    fn test_best_n_totals_count() {
        let fixture = Fixture::new(2);
        let archer = fixture.member("Michael Chen", "AV1");
        // Totals 60, 54, 48; best two sum to 114.
        fixture.confirmed_session(archer, 3, "10");
        fixture.confirmed_session(archer, 4, "9");
        fixture.confirmed_session(archer, 5, "8");

        let standings = ChampionshipRepository::new(&fixture.db)
            .standings("club-championship-2025")
            .unwrap();
        let entry = &standings.categories[0].entries[0];
        assert_eq!(entry.championship_score, 114);
        assert_eq!(entry.counted_scores, vec![60, 54]);
    }

    #[test]
    fn test_fewer_sessions_than_rule() {
        let fixture = Fixture::new(3);
        let archer = fixture.member("Michael Chen", "AV1");
        fixture.confirmed_session(archer, 3, "7");

        let standings = ChampionshipRepository::new(&fixture.db)
            .standings("club-championship-2025")
            .unwrap();
        let entry = &standings.categories[0].entries[0];
        assert_eq!(entry.championship_score, 42);
        assert_eq!(entry.counted_scores, vec![42]);
    }

    #[test]
    fn test_pending_sessions_do_not_qualify() {
        let fixture = Fixture::new(3);
        let archer = fixture.member("Michael Chen", "AV1");

        let sessions = SessionRepository::new(&fixture.db);
        let session = sessions
            .create(&CreateSessionRequest {
                member_id: archer,
                round_id: fixture.round_id,
                shoot_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            })
            .unwrap();
        sessions
            .record_end(
                session.session_id,
                &RecordEndRequest {
                    range_id: fixture.range_id,
                    arrows: vec![ArrowValue::Ten; 6],
                },
            )
            .unwrap();

        let standings = ChampionshipRepository::new(&fixture.db)
            .standings("club-championship-2025")
            .unwrap();
        assert!(standings.categories.is_empty());
    }

    #[test]
    fn test_standings_rank_members() {
        let fixture = Fixture::new(2);
        let leader = fixture.member("Michael Chen", "AV1");
        let runner_up = fixture.member("Tom Hood", "AV2");
        fixture.confirmed_session(leader, 3, "10");
        fixture.confirmed_session(leader, 4, "10");
        fixture.confirmed_session(runner_up, 3, "9");
        fixture.confirmed_session(runner_up, 4, "9");

        let standings = ChampionshipRepository::new(&fixture.db)
            .standings("club-championship-2025")
            .unwrap();
        let entries = &standings.categories[0].entries;
        assert_eq!(entries[0].archer, "Michael Chen");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].archer, "Tom Hood");
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_only_eligible_rounds_qualify() {
        let fixture = Fixture::new(3);
        let other_round = RoundRepository::new(&fixture.db)
            .create(&CreateRoundRequest {
                name: "Short Metric".to_string(),
                ranges: vec![RangeSpec {
                    distance_m: 50,
                    face_size_cm: 80,
                    ends_per_range: 6,
                    arrows_per_end: 6,
                }],
            })
            .unwrap();
        ChampionshipRepository::new(&fixture.db)
            .create(&CreateChampionshipRequest {
                name: "Canberra Ladder".to_string(),
                slug: "canberra-ladder".to_string(),
                policy_year: 2025,
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                counted_scores: 3,
                eligible_rounds: vec![fixture.round_id],
            })
            .unwrap();

        let archer = fixture.member("Michael Chen", "AV1");
        fixture.confirmed_session(archer, 3, "10");

        // A confirmed score on the other round, which must not count.
        let sessions = SessionRepository::new(&fixture.db);
        let session = sessions
            .create(&CreateSessionRequest {
                member_id: archer,
                round_id: other_round.round_id,
                shoot_date: NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
            })
            .unwrap();
        sessions
            .record_end(
                session.session_id,
                &RecordEndRequest {
                    range_id: other_round.ranges[0].range_id,
                    arrows: vec![ArrowValue::Ten; 6],
                },
            )
            .unwrap();
        sessions
            .set_status(
                session.session_id,
                &StatusChangeRequest {
                    status: SessionStatus::Confirmed,
                    changed_by: None,
                },
            )
            .unwrap();

        let standings = ChampionshipRepository::new(&fixture.db)
            .standings("canberra-ladder")
            .unwrap();
        let entry = &standings.categories[0].entries[0];
        assert_eq!(entry.counted_scores, vec![60]);
    }
}
