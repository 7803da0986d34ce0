use storage::{
    ClubDb,
    dto::competition::{
        CompetitionResultsResponse, CreateCompetitionRequest, EnterCompetitionRequest,
        EntryResponse,
    },
    error::Result,
    models::Competition,
    repository::competition::CompetitionRepository,
};

/// List all competitions
pub async fn list_competitions(db: &ClubDb) -> Vec<Competition> {
    CompetitionRepository::new(db).list()
}

/// Get competition by slug
pub async fn get_competition_by_slug(db: &ClubDb, slug: &str) -> Result<Competition> {
    CompetitionRepository::new(db).find_by_slug(slug)
}

/// Create a new competition
pub async fn create_competition(
    db: &ClubDb,
    request: &CreateCompetitionRequest,
) -> Result<Competition> {
    CompetitionRepository::new(db).create(request)
}

/// Enter a session, resolving the archer's category
pub async fn enter_competition(
    db: &ClubDb,
    slug: &str,
    request: &EnterCompetitionRequest,
) -> Result<EntryResponse> {
    CompetitionRepository::new(db).enter(slug, request)
}

/// Freeze totals from Confirmed sessions and rank every category
pub async fn finalize_competition(db: &ClubDb, slug: &str) -> Result<CompetitionResultsResponse> {
    CompetitionRepository::new(db).finalize(slug)
}

/// The result sheet as last finalized
pub async fn competition_results(db: &ClubDb, slug: &str) -> Result<CompetitionResultsResponse> {
    CompetitionRepository::new(db).results(slug)
}
