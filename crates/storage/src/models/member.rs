use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bow type. Serialized as the club's short codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Division {
    #[serde(rename = "R")]
    Recurve,
    #[serde(rename = "C")]
    Compound,
    #[serde(rename = "L")]
    Longbow,
    #[serde(rename = "RB")]
    RecurveBarebow,
    #[serde(rename = "CB")]
    CompoundBarebow,
}

impl Division {
    pub fn code(self) -> &'static str {
        match self {
            Division::Recurve => "R",
            Division::Compound => "C",
            Division::Longbow => "L",
            Division::RecurveBarebow => "RB",
            Division::CompoundBarebow => "CB",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Division::Recurve => "Recurve",
            Division::Compound => "Compound",
            Division::Longbow => "Longbow",
            Division::RecurveBarebow => "Recurve Barebow",
            Division::CompoundBarebow => "Compound Barebow",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A club member. Competing members carry a division and an AV number;
/// recorders carry neither. Members are never hard-deleted because historical
/// scores reference them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub member_id: Uuid,
    pub av_number: Option<String>,
    pub full_name: String,
    pub birth_year: i32,
    pub gender: Gender,
    pub division: Option<Division>,
    pub is_recorder: bool,
    pub created_at: NaiveDateTime,
}

impl Member {
    /// AV number if issued, otherwise the member id. Used anywhere a short
    /// human-readable handle is displayed.
    pub fn display_number(&self) -> String {
        match &self.av_number {
            Some(av) => av.clone(),
            None => self.member_id.to_string(),
        }
    }
}
