use axum::{Router, routing::get};
use storage::ClubDb;

use super::handlers::{club_records, personal_bests};

pub fn routes() -> Router<ClubDb> {
    Router::new()
        .route("/club", get(club_records))
        .route("/personal/:member_id", get(personal_bests))
}
