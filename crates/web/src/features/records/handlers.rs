use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    ClubDb,
    dto::records::{ClubRecord, PersonalBest, RecordsFilter},
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/records/personal/{member_id}",
    params(
        ("member_id" = Uuid, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Personal bests from Confirmed sessions, highest first", body = Vec<PersonalBest>),
        (status = 404, description = "Member not found")
    ),
    tag = "records"
)]
pub async fn personal_bests(
    State(db): State<ClubDb>,
    Path(member_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let bests = services::personal_bests(&db, member_id).await?;

    Ok(Json(bests).into_response())
}

#[utoipa::path(
    get,
    path = "/api/records/club",
    params(RecordsFilter),
    responses(
        (status = 200, description = "Club records per round and division", body = Vec<ClubRecord>)
    ),
    tag = "records"
)]
pub async fn club_records(
    State(db): State<ClubDb>,
    Query(filter): Query<RecordsFilter>,
) -> Result<Response, WebError> {
    let records = services::club_records(&db, &filter).await?;

    Ok(Json(records).into_response())
}
