use anyhow::Context;
use axum::Router;
use storage::ClubDb;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::members::handlers::list_members,
        features::members::handlers::get_member,
        features::members::handlers::create_member,
        features::members::handlers::update_member,
        features::rounds::handlers::list_rounds,
        features::rounds::handlers::get_round,
        features::rounds::handlers::create_round,
        features::rounds::handlers::update_round,
        features::sessions::handlers::session_history,
        features::sessions::handlers::get_session,
        features::sessions::handlers::score_session,
        features::sessions::handlers::session_audit,
        features::sessions::handlers::create_session,
        features::sessions::handlers::record_end,
        features::sessions::handlers::update_arrow,
        features::sessions::handlers::set_status,
        features::sessions::handlers::bulk_set_status,
        features::categories::handlers::list_categories,
        features::categories::handlers::configure_categories,
        features::categories::handlers::resolve_category,
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::create_competition,
        features::competitions::handlers::enter_competition,
        features::competitions::handlers::finalize_competition,
        features::competitions::handlers::competition_results,
        features::championships::handlers::list_championships,
        features::championships::handlers::get_championship,
        features::championships::handlers::create_championship,
        features::championships::handlers::championship_standings,
        features::records::handlers::personal_bests,
        features::records::handlers::club_records,
    ),
    components(
        schemas(
            storage::dto::member::CreateMemberRequest,
            storage::dto::member::UpdateMemberRequest,
            storage::dto::member::MemberResponse,
            storage::dto::round::CreateRoundRequest,
            storage::dto::round::UpdateRoundRequest,
            storage::dto::round::RangeSpec,
            storage::dto::round::RangeResponse,
            storage::dto::round::RoundSummary,
            storage::dto::round::RoundResponse,
            storage::dto::session::CreateSessionRequest,
            storage::dto::session::RecordEndRequest,
            storage::dto::session::UpdateArrowRequest,
            storage::dto::session::StatusChangeRequest,
            storage::dto::session::BulkStatusChangeRequest,
            storage::dto::session::BulkStatusChangeResponse,
            storage::dto::session::SessionResponse,
            storage::dto::session::SessionSummary,
            storage::dto::session::EndResponse,
            storage::dto::session::EndScoreResponse,
            storage::dto::session::RangeScoreResponse,
            storage::dto::session::ScoreResponse,
            storage::dto::session::AuditResponse,
            storage::dto::category::AgeClassSpec,
            storage::dto::category::CategorySpec,
            storage::dto::category::ConfigureCategoriesRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::competition::CreateCompetitionRequest,
            storage::dto::competition::CompetitionResponse,
            storage::dto::competition::EnterCompetitionRequest,
            storage::dto::competition::EntryResponse,
            storage::dto::competition::ResultRow,
            storage::dto::competition::CategoryResults,
            storage::dto::competition::CompetitionResultsResponse,
            storage::dto::championship::CreateChampionshipRequest,
            storage::dto::championship::ChampionshipResponse,
            storage::dto::championship::LadderEntry,
            storage::dto::championship::CategoryStandings,
            storage::dto::championship::StandingsResponse,
            storage::dto::records::PersonalBest,
            storage::dto::records::ClubRecord,
            storage::dto::common::PaginationMeta,
            storage::models::ArrowValue,
            storage::models::Gender,
            storage::models::Division,
            storage::models::SessionStatus,
            storage::models::AgeClass,
        )
    ),
    tags(
        (name = "members", description = "Club member registry"),
        (name = "rounds", description = "Round and range definitions"),
        (name = "sessions", description = "Score capture and the approval workflow"),
        (name = "categories", description = "Competition category configuration and resolution"),
        (name = "competitions", description = "Competitions, entries and result sheets"),
        (name = "championships", description = "Season ladders with best-N scoring"),
        (name = "records", description = "Personal bests and club records"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Archery Club API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = ClubDb::new();
    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let api = Router::new()
        .nest("/members", features::members::routes::routes(api_keys.clone()))
        .nest("/rounds", features::rounds::routes::routes(api_keys.clone()))
        .nest(
            "/sessions",
            features::sessions::routes::routes(api_keys.clone()),
        )
        .nest(
            "/categories",
            features::categories::routes::routes(api_keys.clone()),
        )
        .nest(
            "/competitions",
            features::competitions::routes::routes(api_keys.clone()),
        )
        .nest(
            "/championships",
            features::championships::routes::routes(api_keys.clone()),
        )
        .nest("/records", features::records::routes::routes());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
