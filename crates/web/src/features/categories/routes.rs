use axum::{
    Router, middleware,
    routing::{get, put},
};
use storage::ClubDb;

use crate::middleware::auth::{ApiKeys, require_api_key};

use super::handlers::{configure_categories, list_categories, resolve_category};

pub fn routes(api_keys: ApiKeys) -> Router<ClubDb> {
    let protected = Router::new()
        .route("/", put(configure_categories))
        .route_layer(middleware::from_fn_with_state(api_keys, require_api_key));

    Router::new()
        .route("/", get(list_categories))
        .route("/resolve", get(resolve_category))
        .merge(protected)
}
