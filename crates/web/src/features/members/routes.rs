use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::ClubDb;

use crate::middleware::auth::{ApiKeys, require_api_key};

use super::handlers::{create_member, get_member, list_members, update_member};

pub fn routes(api_keys: ApiKeys) -> Router<ClubDb> {
    let protected = Router::new()
        .route("/", post(create_member))
        .route("/:id", put(update_member))
        .route_layer(middleware::from_fn_with_state(api_keys, require_api_key));

    Router::new()
        .route("/", get(list_members))
        .route("/:id", get(get_member))
        .merge(protected)
}
