use storage::{
    ClubDb,
    dto::session::{
        BulkStatusChangeRequest, BulkStatusChangeResponse, CreateSessionRequest, RecordEndRequest,
        ScoreResponse, SessionSummary, StatusChangeRequest, UpdateArrowRequest,
    },
    error::Result,
    models::{End, Session, SessionAudit},
    repository::{round::RoundRepository, session::SessionRepository},
    services::scoring::aggregate_session,
};
use uuid::Uuid;

/// Start a new session for an archer
pub async fn create_session(db: &ClubDb, request: &CreateSessionRequest) -> Result<Session> {
    SessionRepository::new(db).create(request)
}

/// Get session by id, including its ends
pub async fn get_session(db: &ClubDb, session_id: Uuid) -> Result<Session> {
    SessionRepository::new(db).get(session_id)
}

/// Record the next end for a range
pub async fn record_end(db: &ClubDb, session_id: Uuid, request: &RecordEndRequest) -> Result<End> {
    SessionRepository::new(db).record_end(session_id, request)
}

/// Recorder correction of a single arrow
pub async fn update_arrow(
    db: &ClubDb,
    session_id: Uuid,
    request: &UpdateArrowRequest,
) -> Result<End> {
    SessionRepository::new(db).update_arrow(session_id, request)
}

/// Aggregate a session into range totals, the grand total and the X count
pub async fn score_session(db: &ClubDb, session_id: Uuid) -> Result<ScoreResponse> {
    let session = SessionRepository::new(db).get(session_id)?;
    let round = RoundRepository::new(db).get(session.round_id)?;

    Ok(ScoreResponse::new(
        session_id,
        aggregate_session(&session, &round),
    ))
}

/// A member's session history, newest first
pub async fn history(db: &ClubDb, member_id: Uuid) -> Result<Vec<SessionSummary>> {
    SessionRepository::new(db).history(member_id)
}

/// Apply a recorder's status change
pub async fn set_status(
    db: &ClubDb,
    session_id: Uuid,
    request: &StatusChangeRequest,
) -> Result<(Session, SessionAudit)> {
    SessionRepository::new(db).set_status(session_id, request)
}

/// Bulk status change over a competition's sessions
pub async fn bulk_set_status(
    db: &ClubDb,
    request: &BulkStatusChangeRequest,
) -> Result<BulkStatusChangeResponse> {
    SessionRepository::new(db).bulk_set_status(request)
}

/// Audit trail of a session's status changes
pub async fn audit(db: &ClubDb, session_id: Uuid) -> Result<Vec<SessionAudit>> {
    SessionRepository::new(db).audit(session_id)
}
