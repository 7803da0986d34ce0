use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    ClubDb,
    dto::championship::{ChampionshipResponse, CreateChampionshipRequest, StandingsResponse},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/championships",
    responses(
        (status = 200, description = "List all championships successfully", body = Vec<ChampionshipResponse>)
    ),
    tag = "championships"
)]
pub async fn list_championships(
    State(db): State<ClubDb>,
) -> Result<Json<Vec<ChampionshipResponse>>, WebError> {
    let championships = services::list_championships(&db).await;

    let response: Vec<ChampionshipResponse> = championships
        .into_iter()
        .map(ChampionshipResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/championships/{slug}",
    params(
        ("slug" = String, Path, description = "Championship slug")
    ),
    responses(
        (status = 200, description = "Championship found", body = ChampionshipResponse),
        (status = 404, description = "Championship not found")
    ),
    tag = "championships"
)]
pub async fn get_championship(
    State(db): State<ClubDb>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let championship = services::get_championship_by_slug(&db, &slug).await?;

    Ok(Json(ChampionshipResponse::from(championship)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/championships",
    request_body = CreateChampionshipRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Championship created successfully", body = ChampionshipResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "An eligible round does not exist"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "championships"
)]
pub async fn create_championship(
    State(db): State<ClubDb>,
    Json(req): Json<CreateChampionshipRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_dates()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let championship = services::create_championship(&db, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ChampionshipResponse::from(championship)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/championships/{slug}/standings",
    params(
        ("slug" = String, Path, description = "Championship slug")
    ),
    responses(
        (status = 200, description = "Standings per category from Confirmed qualifying sessions", body = StandingsResponse),
        (status = 404, description = "Championship not found"),
        (status = 422, description = "A qualifying archer has no matching category")
    ),
    tag = "championships"
)]
pub async fn championship_standings(
    State(db): State<ClubDb>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let standings = services::standings(&db, &slug).await?;

    Ok(Json(standings).into_response())
}
