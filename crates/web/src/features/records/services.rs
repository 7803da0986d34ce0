use storage::{
    ClubDb,
    dto::records::{ClubRecord, PersonalBest, RecordsFilter},
    error::Result,
    repository::records::RecordsRepository,
};
use uuid::Uuid;

/// A member's best Confirmed total per round
pub async fn personal_bests(db: &ClubDb, member_id: Uuid) -> Result<Vec<PersonalBest>> {
    RecordsRepository::new(db).personal_bests(member_id)
}

/// Best Confirmed totals per round and division across the club
pub async fn club_records(db: &ClubDb, filter: &RecordsFilter) -> Result<Vec<ClubRecord>> {
    RecordsRepository::new(db).club_records(filter)
}
