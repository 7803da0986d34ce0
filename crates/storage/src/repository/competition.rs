use std::collections::HashMap;

use uuid::Uuid;

use crate::db::{ClubDb, ClubState};
use crate::dto::competition::{
    CategoryResults, CompetitionResultsResponse, CreateCompetitionRequest,
    EnterCompetitionRequest, EntryResponse, ResultRow,
};
use crate::error::{Result, StorageError};
use crate::models::{Category, Competition, CompetitionEntry, SessionStatus};
use crate::services::ranking::{RankingInput, rank_entries};
use crate::services::scoring::aggregate_session;

pub struct CompetitionRepository<'a> {
    db: &'a ClubDb,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(db: &'a ClubDb) -> Self {
        Self { db }
    }

    pub fn create(&self, request: &CreateCompetitionRequest) -> Result<Competition> {
        let mut state = self.db.write();

        if state.competitions.values().any(|c| c.slug == request.slug) {
            return Err(StorageError::constraint(format!(
                "Slug {} already exists",
                request.slug
            )));
        }
        if let Some(round_id) = request.base_round_id
            && !state.rounds.contains_key(&round_id)
        {
            return Err(StorageError::NotFound);
        }

        let competition = Competition {
            competition_id: Uuid::new_v4(),
            name: request.name.clone(),
            slug: request.slug.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            base_round_id: request.base_round_id,
            is_championship: request.is_championship,
            created_at: chrono::Utc::now().naive_utc(),
        };
        state
            .competitions
            .insert(competition.competition_id, competition.clone());

        Ok(competition)
    }

    pub fn find_by_slug(&self, slug: &str) -> Result<Competition> {
        self.db
            .read()
            .competitions
            .values()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    pub fn list(&self) -> Vec<Competition> {
        let state = self.db.read();
        let mut competitions: Vec<Competition> = state.competitions.values().cloned().collect();
        competitions.sort_by(|a, b| a.name.cmp(&b.name));
        competitions
    }

    /// Enters a session into a competition, resolving the archer's category
    /// for the competition's policy year. The frozen total stays null until
    /// finalization.
    pub fn enter(
        &self,
        slug: &str,
        request: &EnterCompetitionRequest,
    ) -> Result<EntryResponse> {
        let mut state = self.db.write();

        let competition = state
            .competitions
            .values()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or(StorageError::NotFound)?;

        let session = state
            .sessions
            .get(&request.session_id)
            .ok_or(StorageError::NotFound)?;

        if state.entries.values().any(|e| {
            e.competition_id == competition.competition_id && e.session_id == session.session_id
        }) {
            return Err(StorageError::constraint(
                "Session is already entered into this competition",
            ));
        }
        if session.shoot_date < competition.start_date
            || session.shoot_date > competition.end_date
        {
            return Err(StorageError::constraint(
                "Session was not shot within the competition window",
            ));
        }

        let member = state
            .members
            .get(&session.member_id)
            .ok_or(StorageError::NotFound)?;
        let division = member.division.ok_or_else(|| {
            StorageError::constraint("Member has no division and cannot be entered")
        })?;

        let category = crate::services::category_resolution::resolve_category(
            &state.categories,
            member.birth_year,
            member.gender,
            division,
            competition.policy_year(),
        )?;
        let category_id = category.category_id;
        let category_name = category.name();

        let entry = CompetitionEntry {
            entry_id: Uuid::new_v4(),
            competition_id: competition.competition_id,
            session_id: request.session_id,
            category_id,
            final_total: None,
            final_x_count: None,
            rank: None,
            created_at: chrono::Utc::now().naive_utc(),
        };
        state.entries.insert(entry.entry_id, entry.clone());

        Ok(EntryResponse::new(&entry, category_name))
    }

    /// Freezes totals and X counts from Confirmed sessions, then ranks every
    /// category. Entries whose session is still pending or rejected keep a
    /// null total and are left out of the ranking.
    pub fn finalize(&self, slug: &str) -> Result<CompetitionResultsResponse> {
        let mut state = self.db.write();

        let competition = state
            .competitions
            .values()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or(StorageError::NotFound)?;

        let mut entry_ids: Vec<Uuid> = state
            .entries
            .values()
            .filter(|e| e.competition_id == competition.competition_id)
            .map(|e| e.entry_id)
            .collect();
        // Stable freeze/rank order regardless of map iteration.
        entry_ids.sort_by_key(|id| {
            state
                .entries
                .get(id)
                .map(|e| e.created_at)
                .unwrap_or_default()
        });

        for entry_id in &entry_ids {
            let frozen = {
                let entry = state.entries.get(entry_id).ok_or(StorageError::NotFound)?;
                let session = state
                    .sessions
                    .get(&entry.session_id)
                    .ok_or(StorageError::NotFound)?;
                if session.status == SessionStatus::Confirmed {
                    let round = state
                        .rounds
                        .get(&session.round_id)
                        .ok_or(StorageError::NotFound)?;
                    let score = aggregate_session(session, round);
                    Some((score.total, score.x_count))
                } else {
                    None
                }
            };
            if let Some(entry) = state.entries.get_mut(entry_id) {
                entry.final_total = frozen.map(|(total, _)| total);
                entry.final_x_count = frozen.map(|(_, x_count)| x_count);
                if frozen.is_none() {
                    entry.rank = None;
                }
            }
        }

        let mut by_category: HashMap<Uuid, Vec<RankingInput>> = HashMap::new();
        for entry_id in &entry_ids {
            let entry = state.entries.get(entry_id).ok_or(StorageError::NotFound)?;
            if let (Some(total), Some(x_count)) = (entry.final_total, entry.final_x_count) {
                by_category
                    .entry(entry.category_id)
                    .or_default()
                    .push(RankingInput {
                        id: entry.entry_id,
                        total,
                        x_count,
                    });
            }
        }

        for inputs in by_category.into_values() {
            for ranked in rank_entries(inputs) {
                if let Some(entry) = state.entries.get_mut(&ranked.id) {
                    entry.rank = Some(ranked.rank);
                }
            }
        }

        build_results(&state, &competition)
    }

    /// The result sheet as last finalized. Unfinalized entries simply do not
    /// appear.
    pub fn results(&self, slug: &str) -> Result<CompetitionResultsResponse> {
        let state = self.db.read();
        let competition = state
            .competitions
            .values()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or(StorageError::NotFound)?;
        build_results(&state, &competition)
    }
}

fn category_by_id(state: &ClubState, category_id: Uuid) -> Result<&Category> {
    state
        .categories
        .iter()
        .find(|c| c.category_id == category_id)
        .ok_or(StorageError::NotFound)
}

fn build_results(
    state: &ClubState,
    competition: &Competition,
) -> Result<CompetitionResultsResponse> {
    let mut rows_by_category: HashMap<Uuid, Vec<ResultRow>> = HashMap::new();

    for entry in state
        .entries
        .values()
        .filter(|e| e.competition_id == competition.competition_id)
    {
        let (Some(total), Some(x_count), Some(rank)) =
            (entry.final_total, entry.final_x_count, entry.rank)
        else {
            continue;
        };
        let session = state
            .sessions
            .get(&entry.session_id)
            .ok_or(StorageError::NotFound)?;
        let member = state
            .members
            .get(&session.member_id)
            .ok_or(StorageError::NotFound)?;
        let round = state
            .rounds
            .get(&session.round_id)
            .ok_or(StorageError::NotFound)?;

        rows_by_category
            .entry(entry.category_id)
            .or_default()
            .push(ResultRow {
                rank,
                tied: false,
                archer: member.full_name.clone(),
                av_number: member.av_number.clone(),
                round_name: round.name.clone(),
                total,
                x_count,
            });
    }

    let mut categories = Vec::with_capacity(rows_by_category.len());
    for (category_id, mut rows) in rows_by_category {
        rows.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.archer.cmp(&b.archer)));
        for i in 0..rows.len() {
            let shared = rows
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other.rank == rows[i].rank);
            rows[i].tied = shared;
        }
        categories.push(CategoryResults {
            category_id,
            category_name: category_by_id(state, category_id)?.name(),
            results: rows,
        });
    }
    categories.sort_by(|a, b| a.category_name.cmp(&b.category_name));

    Ok(CompetitionResultsResponse {
        competition_id: competition.competition_id,
        name: competition.name.clone(),
        slug: competition.slug.clone(),
        categories,
    })
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
        fn new() -> Self {
            let db = ClubDb::new();

            CategoryRepository::new(&db)
                .configure(&ConfigureCategoriesRequest {
                    policy_year: 2025,
                    categories: vec![
                        CategorySpec {
                            age_class: AgeClassSpec {
                                code: "Open".to_string(),
                                min_birth_year: 1950,
                                max_birth_year: 2011,
                            },
                            gender: Gender::Female,
                            division: Division::Recurve,
                        },
                        CategorySpec {
                            age_class: AgeClassSpec {
                                code: "Open".to_string(),
                                min_birth_year: 1950,
                                max_birth_year: 2011,
                            },
                            gender: Gender::Male,
                            division: Division::Recurve,
                        },
                    ],
                })
                .unwrap();

            let round = RoundRepository::new(&db)
                .create(&CreateRoundRequest {
                    name: "WA 900".to_string(),
                    ranges: vec![RangeSpec {
                        distance_m: 60,
                        face_size_cm: 122,
                        ends_per_range: 5,
                        arrows_per_end: 6,
                    }],
                })
                .unwrap();

            CompetitionRepository::new(&db)
                .create(&CreateCompetitionRequest {
                    name: "Summer Open 2025".to_string(),
                    slug: "summer-open-2025".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
                    base_round_id: Some(round.round_id),
                    is_championship: false,
                })
                .unwrap();

            Self {
                db,
                round_id: round.round_id,
                range_id: round.ranges[0].range_id,
            }
        }

        /// Registers an archer, shoots one end scoring `end` tokens,
        /// confirms the session and enters it.
        fn confirmed_entry(&self, name: &str, av: &str, gender: Gender, end: &[&str]) -> Uuid {
            let member = MemberRepository::new(&self.db)
                .create(&CreateMemberRequest {
                    full_name: name.to_string(),
                    av_number: Some(av.to_string()),
                    birth_year: 1990,
                    gender,
                    division: Some(Division::Recurve),
                    is_recorder: false,
                })
                .unwrap();

            let sessions = SessionRepository::new(&self.db);
            let session = sessions
                .create(&CreateSessionRequest {
                    member_id: member.member_id,
                    round_id: self.round_id,
                    shoot_date: NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(),
                })
                .unwrap();
            sessions
                .record_end(
                    session.session_id,
                    &RecordEndRequest {
                        range_id: self.range_id,
                        arrows: end
                            .iter()
                            .map(|t| ArrowValue::from_token(t).unwrap())
                            .collect(),
                    },
                )
                .unwrap();
            sessions
                .set_status(
                    session.session_id,
                    &StatusChangeRequest {
                        status: crate::models::SessionStatus::Confirmed,
                        changed_by: None,
                    },
                )
                .unwrap();

            CompetitionRepository::new(&self.db)
                .enter(
                    "summer-open-2025",
                    &EnterCompetitionRequest {
                        session_id: session.session_id,
                    },
                )
                .unwrap();

            session.session_id
        }
    }

    #[test]
    fn test_entry_resolves_category() {
        let fixture = Fixture::new();
        let member = MemberRepository::new(&fixture.db)
            .create(&CreateMemberRequest {
                full_name: "Sarah Johnson".to_string(),
                av_number: Some("AV1023".to_string()),
                birth_year: 1991,
                gender: Gender::Female,
                division: Some(Division::Recurve),
                is_recorder: false,
            })
            .unwrap();
        let session = SessionRepository::new(&fixture.db)
            .create(&CreateSessionRequest {
                member_id: member.member_id,
                round_id: fixture.round_id,
                shoot_date: NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(),
            })
            .unwrap();

        let entry = CompetitionRepository::new(&fixture.db)
            .enter(
                "summer-open-2025",
                &EnterCompetitionRequest {
                    session_id: session.session_id,
                },
            )
            .unwrap();
        assert_eq!(entry.category_name, "Recurve Open Female");
        assert!(entry.final_total.is_none());
        assert!(entry.rank.is_none());
    }

    #[test]
    fn test_session_outside_window_is_rejected() {
        let fixture = Fixture::new();
        let member = MemberRepository::new(&fixture.db)
            .create(&CreateMemberRequest {
                full_name: "Sarah Johnson".to_string(),
                av_number: Some("AV1023".to_string()),
                birth_year: 1991,
                gender: Gender::Female,
                division: Some(Division::Recurve),
                is_recorder: false,
            })
            .unwrap();
        let session = SessionRepository::new(&fixture.db)
            .create(&CreateSessionRequest {
                member_id: member.member_id,
                round_id: fixture.round_id,
                shoot_date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            })
            .unwrap();

        let err = CompetitionRepository::new(&fixture.db)
            .enter(
                "summer-open-2025",
                &EnterCompetitionRequest {
                    session_id: session.session_id,
                },
            )
            .unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[test]
    fn test_finalize_freezes_and_ranks() {
        let fixture = Fixture::new();
        fixture.confirmed_entry(
            "Sarah Johnson",
            "AV1",
            Gender::Female,
            &["X", "10", "9", "9", "8", "8"],
        );
        fixture.confirmed_entry(
            "Emma Wilson",
            "AV2",
            Gender::Female,
            &["9", "9", "8", "8", "7", "7"],
        );

        let results = CompetitionRepository::new(&fixture.db)
            .finalize("summer-open-2025")
            .unwrap();
        assert_eq!(results.categories.len(), 1);
        let rows = &results.categories[0].results;
        assert_eq!(rows[0].archer, "Sarah Johnson");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].total, 54);
        assert_eq!(rows[0].x_count, 1);
        assert_eq!(rows[1].archer, "Emma Wilson");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].total, 48);
    }

    #[test]
    fn test_pending_sessions_stay_unranked() {
        let fixture = Fixture::new();
        fixture.confirmed_entry(
            "Sarah Johnson",
            "AV1",
            Gender::Female,
            &["X", "10", "9", "9", "8", "8"],
        );

        // A second entry left at Preliminary.
        let member = MemberRepository::new(&fixture.db)
            .create(&CreateMemberRequest {
                full_name: "Emma Wilson".to_string(),
                av_number: Some("AV2".to_string()),
                birth_year: 1990,
                gender: Gender::Female,
                division: Some(Division::Recurve),
                is_recorder: false,
            })
            .unwrap();
        let session = SessionRepository::new(&fixture.db)
            .create(&CreateSessionRequest {
                member_id: member.member_id,
                round_id: fixture.round_id,
                shoot_date: NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(),
            })
            .unwrap();
        CompetitionRepository::new(&fixture.db)
            .enter(
                "summer-open-2025",
                &EnterCompetitionRequest {
                    session_id: session.session_id,
                },
            )
            .unwrap();

        let results = CompetitionRepository::new(&fixture.db)
            .finalize("summer-open-2025")
            .unwrap();
        let rows = &results.categories[0].results;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].archer, "Sarah Johnson");
    }

    #[test]
    fn test_refinalize_shifts_ranks_for_new_entry() {
        let fixture = Fixture::new();
        fixture.confirmed_entry(
            "Alice Archer",
            "AV1",
            Gender::Female,
            &["X", "X", "X", "X", "X", "10"], // 60
        );
        fixture.confirmed_entry(
            "Beth Bowman",
            "AV2",
            Gender::Female,
            &["8", "8", "8", "8", "8", "8"], // 48
        );
        fixture.confirmed_entry(
            "Cara Fletcher",
            "AV3",
            Gender::Female,
            &["7", "7", "7", "7", "7", "7"], // 42
        );

        let repo = CompetitionRepository::new(&fixture.db);
        let before = repo.finalize("summer-open-2025").unwrap();
        let ranks: Vec<(u32, &str)> = before.categories[0]
            .results
            .iter()
            .map(|r| (r.rank, r.archer.as_str()))
            .collect();
        assert_eq!(
            ranks,
            vec![(1, "Alice Archer"), (2, "Beth Bowman"), (3, "Cara Fletcher")]
        );

        fixture.confirmed_entry(
            "Dana Stringer",
            "AV4",
            Gender::Female,
            &["9", "9", "9", "9", "9", "9"], // 54, slots into second
        );

        let after = repo.finalize("summer-open-2025").unwrap();
        let ranks: Vec<(u32, &str)> = after.categories[0]
            .results
            .iter()
            .map(|r| (r.rank, r.archer.as_str()))
            .collect();
        assert_eq!(
            ranks,
            vec![
                (1, "Alice Archer"),
                (2, "Dana Stringer"),
                (3, "Beth Bowman"),
                (4, "Cara Fletcher"),
            ]
        );
    }
}
