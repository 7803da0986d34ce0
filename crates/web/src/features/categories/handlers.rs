use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    ClubDb,
    dto::category::{
        CategoryFilter, CategoryResponse, ConfigureCategoriesRequest, ResolveCategoryParams,
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "Configured categories", body = Vec<CategoryResponse>)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(db): State<ClubDb>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<CategoryResponse>>, WebError> {
    let categories = services::list_categories(&db, filter.policy_year).await;

    let response: Vec<CategoryResponse> =
        categories.iter().map(CategoryResponse::from).collect();

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/categories",
    request_body = ConfigureCategoriesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category configuration replaced for the policy year", body = Vec<CategoryResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Age class windows overlap")
    ),
    tag = "categories"
)]
pub async fn configure_categories(
    State(db): State<ClubDb>,
    Json(req): Json<ConfigureCategoriesRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let categories = services::configure_categories(&db, &req).await?;

    let response: Vec<CategoryResponse> =
        categories.iter().map(CategoryResponse::from).collect();
    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/resolve",
    params(ResolveCategoryParams),
    responses(
        (status = 200, description = "The unique matching category", body = CategoryResponse),
        (status = 422, description = "No category matches")
    ),
    tag = "categories"
)]
pub async fn resolve_category(
    State(db): State<ClubDb>,
    Query(params): Query<ResolveCategoryParams>,
) -> Result<Response, WebError> {
    let category = services::resolve_category(&db, &params).await?;

    Ok(Json(CategoryResponse::from(&category)).into_response())
}
