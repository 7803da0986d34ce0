use std::collections::HashMap;

use uuid::Uuid;

use crate::db::ClubDb;
use crate::dto::records::{ClubRecord, PersonalBest, RecordsFilter};
use crate::error::{Result, StorageError};
use crate::models::{Division, SessionStatus};
use crate::services::scoring::aggregate_session;

pub struct RecordsRepository<'a> {
    db: &'a ClubDb,
}

impl<'a> RecordsRepository<'a> {
    pub fn new(db: &'a ClubDb) -> Self {
        Self { db }
    }

    /// The member's best Confirmed total per round, highest first. Equal
    /// totals keep the earliest achievement.
    pub fn personal_bests(&self, member_id: Uuid) -> Result<Vec<PersonalBest>> {
        let state = self.db.read();

        let member = state
            .members
            .get(&member_id)
            .ok_or(StorageError::NotFound)?;
        let Some(division) = member.division else {
            return Ok(Vec::new());
        };

        let mut best_by_round: HashMap<Uuid, PersonalBest> = HashMap::new();
        for session in state
            .sessions
            .values()
            .filter(|s| s.member_id == member_id && s.status == SessionStatus::Confirmed)
        {
            let round = state
                .rounds
                .get(&session.round_id)
                .ok_or(StorageError::NotFound)?;
            let score = aggregate_session(session, round);
            let candidate = PersonalBest {
                round_id: round.round_id,
                round_name: round.name.clone(),
                division,
                shoot_date: session.shoot_date,
                total: score.total,
                x_count: score.x_count,
            };
            best_by_round
                .entry(round.round_id)
                .and_modify(|best| {
                    if beats(candidate.total, candidate.shoot_date, best) {
                        *best = candidate.clone();
                    }
                })
                .or_insert(candidate);
        }

        let mut bests: Vec<PersonalBest> = best_by_round.into_values().collect();
        bests.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.round_name.cmp(&b.round_name)));
        Ok(bests)
    }

    /// Highest Confirmed total per round and division across the whole club.
    pub fn club_records(&self, filter: &RecordsFilter) -> Result<Vec<ClubRecord>> {
        let state = self.db.read();

        let mut best: HashMap<(Uuid, Division), ClubRecord> = HashMap::new();
        for session in state
            .sessions
            .values()
            .filter(|s| s.status == SessionStatus::Confirmed)
        {
            let member = state
                .members
                .get(&session.member_id)
                .ok_or(StorageError::NotFound)?;
            let Some(division) = member.division else {
                continue;
            };
            if filter.division.is_some_and(|wanted| wanted != division) {
                continue;
            }
            let round = state
                .rounds
                .get(&session.round_id)
                .ok_or(StorageError::NotFound)?;
            let score = aggregate_session(session, round);
            let candidate = ClubRecord {
                round_id: round.round_id,
                round_name: round.name.clone(),
                division,
                archer: member.full_name.clone(),
                av_number: member.av_number.clone(),
                shoot_date: session.shoot_date,
                total: score.total,
                x_count: score.x_count,
            };
            best.entry((round.round_id, division))
                .and_modify(|record| {
                    if candidate.total > record.total
                        || (candidate.total == record.total
                            && candidate.shoot_date < record.shoot_date)
                    {
                        *record = candidate.clone();
                    }
                })
                .or_insert(candidate);
        }

        let mut records: Vec<ClubRecord> = best.into_values().collect();
        records.sort_by(|a, b| {
            a.round_name
                .cmp(&b.round_name)
                .then_with(|| a.division.code().cmp(b.division.code()))
        });
        Ok(records)
    }
}

fn beats(total: u32, shoot_date: chrono::NaiveDate, best: &PersonalBest) -> bool {
    total > best.total || (total == best.total && shoot_date < best.shoot_date)
}
