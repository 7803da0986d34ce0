use storage::{
    ClubDb,
    dto::championship::{CreateChampionshipRequest, StandingsResponse},
    error::Result,
    models::Championship,
    repository::championship::ChampionshipRepository,
};

/// List all championships
pub async fn list_championships(db: &ClubDb) -> Vec<Championship> {
    ChampionshipRepository::new(db).list()
}

/// Get championship by slug
pub async fn get_championship_by_slug(db: &ClubDb, slug: &str) -> Result<Championship> {
    ChampionshipRepository::new(db).find_by_slug(slug)
}

/// Create a new championship
pub async fn create_championship(
    db: &ClubDb,
    request: &CreateChampionshipRequest,
) -> Result<Championship> {
    ChampionshipRepository::new(db).create(request)
}

/// The ladder: best-N sums per member, ranked per category
pub async fn standings(db: &ClubDb, slug: &str) -> Result<StandingsResponse> {
    ChampionshipRepository::new(db).standings(slug)
}
