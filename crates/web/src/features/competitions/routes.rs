use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::ClubDb;

use crate::middleware::auth::{ApiKeys, require_api_key};

use super::handlers::{
    competition_results, create_competition, enter_competition, finalize_competition,
    get_competition, list_competitions,
};

pub fn routes(api_keys: ApiKeys) -> Router<ClubDb> {
    let protected = Router::new()
        .route("/", post(create_competition))
        .route("/:slug/entries", post(enter_competition))
        .route("/:slug/finalize", post(finalize_competition))
        .route_layer(middleware::from_fn_with_state(api_keys, require_api_key));

    Router::new()
        .route("/", get(list_competitions))
        .route("/:slug", get(get_competition))
        .route("/:slug/results", get(competition_results))
        .merge(protected)
}
