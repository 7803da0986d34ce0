use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::ClubDb;

use crate::middleware::auth::{ApiKeys, require_api_key};

use super::handlers::{create_round, get_round, list_rounds, update_round};

pub fn routes(api_keys: ApiKeys) -> Router<ClubDb> {
    let protected = Router::new()
        .route("/", post(create_round))
        .route("/:id", put(update_round))
        .route_layer(middleware::from_fn_with_state(api_keys, require_api_key));

    Router::new()
        .route("/", get(list_rounds))
        .route("/:id", get(get_round))
        .merge(protected)
}
