use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::ClubDb;

use crate::middleware::auth::{ApiKeys, require_api_key};

use super::handlers::{
    bulk_set_status, create_session, get_session, record_end, score_session, session_audit,
    session_history, set_status, update_arrow,
};

pub fn routes(api_keys: ApiKeys) -> Router<ClubDb> {
    let protected = Router::new()
        .route("/", post(create_session))
        .route("/:id/ends", post(record_end))
        .route("/:id/arrows", put(update_arrow))
        .route("/:id/status", post(set_status))
        .route("/status/bulk", post(bulk_set_status))
        .route_layer(middleware::from_fn_with_state(api_keys, require_api_key));

    Router::new()
        .route("/", get(session_history))
        .route("/:id", get(get_session))
        .route("/:id/score", get(score_session))
        .route("/:id/audit", get(session_audit))
        .merge(protected)
}
