use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    ClubDb,
    dto::round::{CreateRoundRequest, RoundResponse, RoundSummary, UpdateRoundRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rounds",
    responses(
        (status = 200, description = "List all round definitions", body = Vec<RoundSummary>)
    ),
    tag = "rounds"
)]
pub async fn list_rounds(State(db): State<ClubDb>) -> Result<Json<Vec<RoundSummary>>, WebError> {
    let rounds = services::list_rounds(&db).await;

    let response: Vec<RoundSummary> = rounds.iter().map(RoundSummary::from).collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/rounds/{id}",
    params(
        ("id" = Uuid, Path, description = "Round id")
    ),
    responses(
        (status = 200, description = "Round found", body = RoundResponse),
        (status = 404, description = "Round not found")
    ),
    tag = "rounds"
)]
pub async fn get_round(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let round = services::get_round(&db, id).await?;

    Ok(Json(RoundResponse::from(&round)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rounds",
    request_body = CreateRoundRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Round created successfully", body = RoundResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Round name already exists")
    ),
    tag = "rounds"
)]
pub async fn create_round(
    State(db): State<ClubDb>,
    Json(req): Json<CreateRoundRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let round = services::create_round(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(RoundResponse::from(&round))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/rounds/{id}",
    params(
        ("id" = Uuid, Path, description = "Round id")
    ),
    request_body = UpdateRoundRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Round updated successfully", body = RoundResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Round not found"),
        (status = 409, description = "Round has recorded sessions")
    ),
    tag = "rounds"
)]
pub async fn update_round(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoundRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let round = services::update_round(&db, id, &req).await?;

    Ok(Json(RoundResponse::from(&round)).into_response())
}
