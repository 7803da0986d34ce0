use thiserror::Error;

use crate::models::SessionStatus;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("No category matches birth year {birth_year} for policy year {policy_year}")]
    NoMatchingCategory { birth_year: i32, policy_year: i32 },

    #[error(
        "{matches} categories match birth year {birth_year} for policy year {policy_year}; age class ranges must not overlap"
    )]
    AmbiguousCategory {
        birth_year: i32,
        policy_year: i32,
        matches: usize,
    },

    #[error("End has {got} arrows, range is configured for {expected}")]
    InvalidArrowCount { expected: usize, got: usize },

    #[error("Illegal status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    #[error("Locked: {0}")]
    Locked(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn constraint(msg: impl Into<String>) -> Self {
        StorageError::ConstraintViolation(msg.into())
    }

    /// True for errors that indicate broken reference configuration rather
    /// than bad caller input. These are reported to an administrator.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, StorageError::AmbiguousCategory { .. })
    }
}
