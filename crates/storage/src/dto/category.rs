use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{AgeClass, Category, Division, Gender};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AgeClassSpec {
    #[validate(length(min = 1, max = 32))]
    pub code: String,

    #[validate(range(min = 1900, max = 2100))]
    pub min_birth_year: i32,

    #[validate(range(min = 1900, max = 2100))]
    pub max_birth_year: i32,
}

impl AgeClassSpec {
    pub fn validate_bounds(&self) -> Result<(), &'static str> {
        if self.max_birth_year < self.min_birth_year {
            return Err("Age class max birth year must not precede min birth year");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategorySpec {
    #[validate(nested)]
    pub age_class: AgeClassSpec,
    pub gender: Gender,
    pub division: Division,
}

/// Replaces the category configuration for one policy year. Categories are
/// administrative reference data, rewritten as a whole per year.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ConfigureCategoriesRequest {
    #[validate(range(min = 1900, max = 2100))]
    pub policy_year: i32,

    #[validate(length(min = 1, message = "At least one category is required"))]
    #[validate(nested)]
    pub categories: Vec<CategorySpec>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CategoryFilter {
    pub policy_year: Option<i32>,
}

/// Query parameters for resolving an archer's bracket directly.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ResolveCategoryParams {
    pub birth_year: i32,
    pub gender: Gender,
    pub division: Division,
    pub policy_year: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub category_id: Uuid,
    pub policy_year: i32,
    pub name: String,
    pub age_class: AgeClass,
    pub gender: Gender,
    pub division: Division,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.category_id,
            policy_year: category.policy_year,
            name: category.name(),
            age_class: category.age_class.clone(),
            gender: category.gender,
            division: category.division,
        }
    }
}
