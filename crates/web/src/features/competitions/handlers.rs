use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    ClubDb,
    dto::competition::{
        CompetitionResponse, CompetitionResultsResponse, CreateCompetitionRequest,
        EnterCompetitionRequest, EntryResponse,
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions",
    responses(
        (status = 200, description = "List all competitions successfully", body = Vec<CompetitionResponse>)
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<ClubDb>,
) -> Result<Json<Vec<CompetitionResponse>>, WebError> {
    let competitions = services::list_competitions(&db).await;

    let response: Vec<CompetitionResponse> = competitions
        .into_iter()
        .map(CompetitionResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{slug}",
    params(
        ("slug" = String, Path, description = "Competition slug")
    ),
    responses(
        (status = 200, description = "Competition found", body = CompetitionResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<ClubDb>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let competition = services::get_competition_by_slug(&db, &slug).await?;

    Ok(Json(CompetitionResponse::from(competition)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions",
    request_body = CreateCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Competition created successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(db): State<ClubDb>,
    Json(req): Json<CreateCompetitionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_dates()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let competition = services::create_competition(&db, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CompetitionResponse::from(competition)),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions/{slug}/entries",
    params(
        ("slug" = String, Path, description = "Competition slug")
    ),
    request_body = EnterCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Session entered under its resolved category", body = EntryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition or session not found"),
        (status = 409, description = "Duplicate entry or session outside the window"),
        (status = 422, description = "No category matches the archer")
    ),
    tag = "competitions"
)]
pub async fn enter_competition(
    State(db): State<ClubDb>,
    Path(slug): Path<String>,
    Json(req): Json<EnterCompetitionRequest>,
) -> Result<Response, WebError> {
    let entry = services::enter_competition(&db, &slug, &req).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions/{slug}/finalize",
    params(
        ("slug" = String, Path, description = "Competition slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Totals frozen from Confirmed sessions and categories ranked", body = CompetitionResultsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn finalize_competition(
    State(db): State<ClubDb>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let results = services::finalize_competition(&db, &slug).await?;

    Ok(Json(results).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitions/{slug}/results",
    params(
        ("slug" = String, Path, description = "Competition slug")
    ),
    responses(
        (status = 200, description = "Result sheet grouped per category", body = CompetitionResultsResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn competition_results(
    State(db): State<ClubDb>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let results = services::competition_results(&db, &slug).await?;

    Ok(Json(results).into_response())
}
