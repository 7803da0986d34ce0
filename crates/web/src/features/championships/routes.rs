use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::ClubDb;

use crate::middleware::auth::{ApiKeys, require_api_key};

use super::handlers::{
    championship_standings, create_championship, get_championship, list_championships,
};

pub fn routes(api_keys: ApiKeys) -> Router<ClubDb> {
    let protected = Router::new()
        .route("/", post(create_championship))
        .route_layer(middleware::from_fn_with_state(api_keys, require_api_key));

    Router::new()
        .route("/", get(list_championships))
        .route("/:slug", get(get_championship))
        .route("/:slug/standings", get(championship_standings))
        .merge(protected)
}
