use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Division, Gender};

/// A named inclusive birth-year window, tied to a policy year.
///
/// Age classes for one policy year must partition birth years without
/// overlap; category resolution treats an overlap as a configuration defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgeClass {
    pub code: String,
    pub min_birth_year: i32,
    pub max_birth_year: i32,
}

impl AgeClass {
    pub fn contains(&self, birth_year: i32) -> bool {
        (self.min_birth_year..=self.max_birth_year).contains(&birth_year)
    }
}

/// A competitive bracket: age class x gender x division, valid for one
/// policy year. Derived configuration data, re-loaded per year.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub category_id: Uuid,
    pub policy_year: i32,
    pub age_class: AgeClass,
    pub gender: Gender,
    pub division: Division,
}

impl Category {
    /// Display name in the club's result-sheet order, e.g.
    /// "Recurve Open Female".
    pub fn name(&self) -> String {
        format!(
            "{} {} {}",
            self.division.label(),
            self.age_class.code,
            self.gender.label()
        )
    }

    pub fn matches(
        &self,
        birth_year: i32,
        gender: Gender,
        division: Division,
        policy_year: i32,
    ) -> bool {
        self.policy_year == policy_year
            && self.gender == gender
            && self.division == division
            && self.age_class.contains(birth_year)
    }
}
