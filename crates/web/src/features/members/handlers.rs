use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    ClubDb,
    dto::common::{PaginatedResponse, PaginationParams},
    dto::member::{CreateMemberRequest, MemberResponse, UpdateMemberRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/members",
    params(PaginationParams),
    responses(
        (status = 200, description = "Members listed successfully", body = PaginatedResponse<MemberResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "members"
)]
pub async fn list_members(
    State(db): State<ClubDb>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (members, total_items) = services::list_members(&db, &pagination).await;

    let data: Vec<MemberResponse> = members.into_iter().map(MemberResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, &pagination, total_items)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Member not found")
    ),
    tag = "members"
)]
pub async fn get_member(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let member = services::get_member(&db, id).await?;

    Ok(Json(MemberResponse::from(member)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = CreateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Member registered successfully", body = MemberResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Role invariant or AV number conflict")
    ),
    tag = "members"
)]
pub async fn create_member(
    State(db): State<ClubDb>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let member = services::create_member(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member id")
    ),
    request_body = UpdateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member updated successfully", body = MemberResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member not found")
    ),
    tag = "members"
)]
pub async fn update_member(
    State(db): State<ClubDb>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let member = services::update_member(&db, id, &req).await?;

    Ok(Json(MemberResponse::from(member)).into_response())
}
