use uuid::Uuid;

use crate::db::ClubDb;
use crate::dto::category::ConfigureCategoriesRequest;
use crate::error::{Result, StorageError};
use crate::models::{AgeClass, Category, Division, Gender};
use crate::services::category_resolution::resolve_category;

pub struct CategoryRepository<'a> {
    db: &'a ClubDb,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a ClubDb) -> Self {
        Self { db }
    }

    /// Replaces the category configuration for one policy year.
    ///
    /// Rejects configurations whose age-class windows overlap within a
    /// (gender, division) bracket, so that resolution can never become
    /// ambiguous for that year.
    pub fn configure(&self, request: &ConfigureCategoriesRequest) -> Result<Vec<Category>> {
        for spec in &request.categories {
            spec.age_class
                .validate_bounds()
                .map_err(StorageError::constraint)?;
        }

        let categories: Vec<Category> = request
            .categories
            .iter()
            .map(|spec| Category {
                category_id: Uuid::new_v4(),
                policy_year: request.policy_year,
                age_class: AgeClass {
                    code: spec.age_class.code.clone(),
                    min_birth_year: spec.age_class.min_birth_year,
                    max_birth_year: spec.age_class.max_birth_year,
                },
                gender: spec.gender,
                division: spec.division,
            })
            .collect();

        for (i, a) in categories.iter().enumerate() {
            for b in &categories[i + 1..] {
                if a.gender == b.gender
                    && a.division == b.division
                    && a.age_class.min_birth_year <= b.age_class.max_birth_year
                    && b.age_class.min_birth_year <= a.age_class.max_birth_year
                {
                    return Err(StorageError::constraint(format!(
                        "Age classes {} and {} overlap for {} {}",
                        a.age_class.code,
                        b.age_class.code,
                        a.division,
                        a.gender
                    )));
                }
            }
        }

        let mut state = self.db.write();
        state
            .categories
            .retain(|c| c.policy_year != request.policy_year);
        state.categories.extend(categories.clone());

        Ok(categories)
    }

    pub fn list(&self, policy_year: Option<i32>) -> Vec<Category> {
        let state = self.db.read();
        let mut categories: Vec<Category> = state
            .categories
            .iter()
            .filter(|c| policy_year.is_none_or(|year| c.policy_year == year))
            .cloned()
            .collect();
        categories.sort_by(|a, b| {
            a.policy_year
                .cmp(&b.policy_year)
                .then_with(|| a.name().cmp(&b.name()))
        });
        categories
    }

    pub fn resolve(
        &self,
        birth_year: i32,
        gender: Gender,
        division: Division,
        policy_year: i32,
    ) -> Result<Category> {
        let state = self.db.read();
        resolve_category(&state.categories, birth_year, gender, division, policy_year)
            .map(|category| category.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::category::{AgeClassSpec, CategorySpec};

    fn spec(code: &str, min: i32, max: i32, gender: Gender, division: Division) -> CategorySpec {
        CategorySpec {
            age_class: AgeClassSpec {
                code: code.to_string(),
                min_birth_year: min,
                max_birth_year: max,
            },
            gender,
            division,
        }
    }

    pub(crate) fn recurve_2025() -> ConfigureCategoriesRequest {
        ConfigureCategoriesRequest {
            policy_year: 2025,
            categories: vec![
                spec("U14", 2012, 2025, Gender::Male, Division::Recurve),
                spec("U14", 2012, 2025, Gender::Female, Division::Recurve),
                spec("Open", 1950, 2011, Gender::Male, Division::Recurve),
                spec("Open", 1950, 2011, Gender::Female, Division::Recurve),
                spec("Open", 1950, 2011, Gender::Male, Division::Compound),
                spec("Open", 1950, 2011, Gender::Female, Division::Compound),
            ],
        }
    }

    #[test]
    fn test_configure_then_resolve() {
        let db = ClubDb::new();
        let repo = CategoryRepository::new(&db);
        repo.configure(&recurve_2025()).unwrap();

        let category = repo
            .resolve(2015, Gender::Male, Division::Recurve, 2025)
            .unwrap();
        assert_eq!(category.age_class.code, "U14");

        let err = repo
            .resolve(1900, Gender::Male, Division::Recurve, 2025)
            .unwrap_err();
        assert!(matches!(err, StorageError::NoMatchingCategory { .. }));
    }

    #[test]
    fn test_overlapping_windows_rejected() {
        let db = ClubDb::new();
        let repo = CategoryRepository::new(&db);
        let mut request = recurve_2025();
        request
            .categories
            .push(spec("U16", 2010, 2013, Gender::Male, Division::Recurve));

        let err = repo.configure(&request).unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[test]
    fn test_reconfigure_replaces_the_year() {
        let db = ClubDb::new();
        let repo = CategoryRepository::new(&db);
        repo.configure(&recurve_2025()).unwrap();
        repo.configure(&recurve_2025()).unwrap();

        assert_eq!(repo.list(Some(2025)).len(), 6);
        assert!(repo.list(Some(2024)).is_empty());
    }
}
