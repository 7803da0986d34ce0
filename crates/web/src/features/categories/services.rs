use storage::{
    ClubDb,
    dto::category::{ConfigureCategoriesRequest, ResolveCategoryParams},
    error::Result,
    models::Category,
    repository::category::CategoryRepository,
};

/// List categories, optionally restricted to one policy year
pub async fn list_categories(db: &ClubDb, policy_year: Option<i32>) -> Vec<Category> {
    CategoryRepository::new(db).list(policy_year)
}

/// Replace the category configuration for one policy year
pub async fn configure_categories(
    db: &ClubDb,
    request: &ConfigureCategoriesRequest,
) -> Result<Vec<Category>> {
    CategoryRepository::new(db).configure(request)
}

/// Resolve the unique category for an archer's demographics
pub async fn resolve_category(db: &ClubDb, params: &ResolveCategoryParams) -> Result<Category> {
    CategoryRepository::new(db).resolve(
        params.birth_year,
        params.gender,
        params.division,
        params.policy_year,
    )
}
