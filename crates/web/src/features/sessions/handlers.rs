use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    ClubDb,
    dto::session::{
        AuditResponse, BulkStatusChangeRequest, BulkStatusChangeResponse, CreateSessionRequest,
        EndResponse, RecordEndRequest, ScoreResponse, SessionHistoryFilter, SessionResponse,
        SessionSummary, StatusChangeRequest, UpdateArrowRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/sessions",
    params(SessionHistoryFilter),
    responses(
        (status = 200, description = "The member's sessions, newest first, with completion progress and running totals", body = Vec<SessionSummary>),
        (status = 404, description = "Member not found")
    ),
    tag = "sessions"
)]
pub async fn session_history(
    State(db): State<ClubDb>,
    Query(filter): Query<SessionHistoryFilter>,
) -> Result<Response, WebError> {
    let history = services::history(&db, filter.member_id).await?;

    Ok(Json(history).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Session found", body = SessionResponse),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let session = services::get_session(&db, id).await?;

    Ok(Json(SessionResponse::from(&session)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/score",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Aggregated totals for the session, partial data included", body = ScoreResponse),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn score_session(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let score = services::score_session(&db, id).await?;

    Ok(Json(score).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/audit",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Status-change audit trail", body = Vec<AuditResponse>),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn session_audit(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let audit = services::audit(&db, id).await?;

    let response: Vec<AuditResponse> = audit.iter().map(AuditResponse::from).collect();
    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = CreateSessionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Session created in Preliminary status", body = SessionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member or round not found"),
        (status = 409, description = "Recorders do not shoot sessions")
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(db): State<ClubDb>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Response, WebError> {
    let session = services::create_session(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/ends",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    request_body = RecordEndRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "End recorded with the next contiguous end number", body = EndResponse),
        (status = 400, description = "Arrow count does not match the range configuration"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session or range not found"),
        (status = 409, description = "Range already complete or session locked")
    ),
    tag = "sessions"
)]
pub async fn record_end(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordEndRequest>,
) -> Result<Response, WebError> {
    let end = services::record_end(&db, id, &req).await?;

    Ok((StatusCode::CREATED, Json(EndResponse::from(&end))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/arrows",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    request_body = UpdateArrowRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Arrow value corrected", body = EndResponse),
        (status = 400, description = "Arrow number out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session or end not found"),
        (status = 409, description = "Session locked")
    ),
    tag = "sessions"
)]
pub async fn update_arrow(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArrowRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let end = services::update_arrow(&db, id, &req).await?;

    Ok(Json(EndResponse::from(&end)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    request_body = StatusChangeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status changed, audit row written", body = SessionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Illegal transition or session locked")
    ),
    tag = "sessions"
)]
pub async fn set_status(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Response, WebError> {
    let (session, _) = services::set_status(&db, id, &req).await?;

    Ok(Json(SessionResponse::from(&session)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions/status/bulk",
    request_body = BulkStatusChangeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Counts of updated, skipped and locked sessions", body = BulkStatusChangeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "sessions"
)]
pub async fn bulk_set_status(
    State(db): State<ClubDb>,
    Json(req): Json<BulkStatusChangeRequest>,
) -> Result<Response, WebError> {
    let response = services::bulk_set_status(&db, &req).await?;

    Ok(Json(response).into_response())
}
