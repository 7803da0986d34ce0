use std::collections::HashMap;

use crate::error::{Result, StorageError};
use crate::models::{Category, Division, Gender};

/// Finds the single category whose age-class window contains `birth_year`
/// and whose gender/division/policy year match exactly.
///
/// Zero matches is a configuration gap (`NoMatchingCategory`, surfaced to an
/// administrator). More than one match means the age-class windows overlap,
/// which well-formed configuration never produces; it is logged and returned
/// as `AmbiguousCategory`.
pub fn resolve_category<'a>(
    categories: &'a [Category],
    birth_year: i32,
    gender: Gender,
    division: Division,
    policy_year: i32,
) -> Result<&'a Category> {
    let mut matches = categories
        .iter()
        .filter(|c| c.matches(birth_year, gender, division, policy_year));

    let first = matches.next().ok_or(StorageError::NoMatchingCategory {
        birth_year,
        policy_year,
    })?;

    let extra = matches.count();
    if extra > 0 {
        tracing::error!(
            birth_year,
            policy_year,
            matches = extra + 1,
            "overlapping age class windows in category configuration"
        );
        return Err(StorageError::AmbiguousCategory {
            birth_year,
            policy_year,
            matches: extra + 1,
        });
    }

    Ok(first)
}

/// Category lookup table keyed by (policy year, gender, division), so that
/// repeated resolution during finalization and standings does not rescan the
/// whole configuration.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    brackets: HashMap<(i32, Gender, Division), Vec<Category>>,
}

impl CategoryIndex {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut brackets: HashMap<(i32, Gender, Division), Vec<Category>> = HashMap::new();
        for category in categories {
            brackets
                .entry((category.policy_year, category.gender, category.division))
                .or_default()
                .push(category);
        }
        Self { brackets }
    }

    pub fn resolve(
        &self,
        birth_year: i32,
        gender: Gender,
        division: Division,
        policy_year: i32,
    ) -> Result<&Category> {
        let bracket = self
            .brackets
            .get(&(policy_year, gender, division))
            .map(Vec::as_slice)
            .unwrap_or_default();
        resolve_category(bracket, birth_year, gender, division, policy_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgeClass;
    use uuid::Uuid;

    fn category(code: &str, min: i32, max: i32, gender: Gender, division: Division) -> Category {
        Category {
            category_id: Uuid::new_v4(),
            policy_year: 2025,
            age_class: AgeClass {
                code: code.to_string(),
                min_birth_year: min,
                max_birth_year: max,
            },
            gender,
            division,
        }
    }

    fn configuration() -> Vec<Category> {
        vec![
            category("U14", 2012, 2025, Gender::Male, Division::Recurve),
            category("U18", 2008, 2011, Gender::Male, Division::Recurve),
            category("Open", 1950, 2007, Gender::Male, Division::Recurve),
            category("Open", 1950, 2007, Gender::Female, Division::Recurve),
            category("Open", 1950, 2007, Gender::Male, Division::Compound),
        ]
    }

    #[test]
    fn test_resolves_unique_age_class() {
        let categories = configuration();
        let resolved = resolve_category(&categories, 2015, Gender::Male, Division::Recurve, 2025)
            .unwrap();
        assert_eq!(resolved.age_class.code, "U14");
    }

    #[test]
    fn test_gender_and_division_must_match_exactly() {
        let categories = configuration();
        let resolved = resolve_category(&categories, 1990, Gender::Female, Division::Recurve, 2025)
            .unwrap();
        assert_eq!(resolved.gender, Gender::Female);
        assert_eq!(resolved.division, Division::Recurve);
    }

    #[test]
    fn test_no_matching_category_for_uncovered_birth_year() {
        let categories = configuration();
        let err = resolve_category(&categories, 1900, Gender::Male, Division::Recurve, 2025)
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::NoMatchingCategory {
                birth_year: 1900,
                policy_year: 2025
            }
        ));
    }

    #[test]
    fn test_no_matching_category_for_unoffered_division() {
        let categories = configuration();
        let err = resolve_category(&categories, 1990, Gender::Female, Division::Longbow, 2025)
            .unwrap_err();
        assert!(matches!(err, StorageError::NoMatchingCategory { .. }));
    }

    #[test]
    fn test_overlapping_windows_are_ambiguous() {
        let mut categories = configuration();
        categories.push(category("U16", 2010, 2013, Gender::Male, Division::Recurve));

        let err = resolve_category(&categories, 2012, Gender::Male, Division::Recurve, 2025)
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::AmbiguousCategory { matches: 2, .. }
        ));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_index_matches_direct_resolution() {
        let categories = configuration();
        let index = CategoryIndex::new(categories.clone());

        let direct = resolve_category(&categories, 2010, Gender::Male, Division::Recurve, 2025)
            .unwrap();
        let indexed = index
            .resolve(2010, Gender::Male, Division::Recurve, 2025)
            .unwrap();
        assert_eq!(direct.age_class.code, indexed.age_class.code);
    }

    #[test]
    fn test_index_misses_unknown_bracket() {
        let index = CategoryIndex::new(configuration());
        let err = index
            .resolve(1990, Gender::Female, Division::Compound, 2025)
            .unwrap_err();
        assert!(matches!(err, StorageError::NoMatchingCategory { .. }));
    }
}
