use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Division, Gender, Member};

/// Request payload for registering a club member.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMemberRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub full_name: String,

    #[validate(custom(function = "validate_av_number"))]
    pub av_number: Option<String>,

    #[validate(range(min = 1900, max = 2100, message = "Birth year out of range"))]
    pub birth_year: i32,

    pub gender: Gender,

    pub division: Option<Division>,

    #[serde(default)]
    pub is_recorder: bool,
}

impl CreateMemberRequest {
    /// Cross-field role invariant: competing members need a division and an
    /// AV number, recorders must have neither.
    pub fn validate_role(&self) -> Result<(), &'static str> {
        if self.is_recorder {
            if self.division.is_some() {
                return Err("A recorder must not have a division");
            }
            if self.av_number.is_some() {
                return Err("A recorder must not have an AV number");
            }
        } else {
            if self.division.is_none() {
                return Err("A competing member must have a division");
            }
            if self.av_number.is_none() {
                return Err("A competing member must have an AV number");
            }
        }
        Ok(())
    }
}

/// Request payload for updating member demographics. Role flags are fixed at
/// registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[validate(custom(function = "validate_av_number"))]
    pub av_number: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub birth_year: Option<i32>,

    pub gender: Option<Gender>,

    pub division: Option<Division>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub member_id: Uuid,
    pub av_number: Option<String>,
    pub full_name: String,
    pub birth_year: i32,
    pub gender: Gender,
    pub division: Option<Division>,
    pub is_recorder: bool,
    pub created_at: NaiveDateTime,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            member_id: member.member_id,
            av_number: member.av_number,
            full_name: member.full_name,
            birth_year: member.birth_year,
            gender: member.gender,
            division: member.division,
            is_recorder: member.is_recorder,
            created_at: member.created_at,
        }
    }
}

fn validate_av_number(av_number: &str) -> Result<(), validator::ValidationError> {
    let is_valid = !av_number.is_empty()
        && av_number.len() <= 32
        && av_number.chars().all(|c| c.is_ascii_alphanumeric());

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_av_number"))
    }
}
