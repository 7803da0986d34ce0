use storage::{
    ClubDb,
    dto::round::{CreateRoundRequest, UpdateRoundRequest},
    error::Result,
    models::Round,
    repository::round::RoundRepository,
};
use uuid::Uuid;

/// List all rounds
pub async fn list_rounds(db: &ClubDb) -> Vec<Round> {
    RoundRepository::new(db).list()
}

/// Get round by id
pub async fn get_round(db: &ClubDb, round_id: Uuid) -> Result<Round> {
    RoundRepository::new(db).get(round_id)
}

/// Define a new round
pub async fn create_round(db: &ClubDb, request: &CreateRoundRequest) -> Result<Round> {
    RoundRepository::new(db).create(request)
}

/// Update a round definition
pub async fn update_round(
    db: &ClubDb,
    round_id: Uuid,
    request: &UpdateRoundRequest,
) -> Result<Round> {
    RoundRepository::new(db).update(round_id, request)
}
