use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{ArrowValue, End, Session, SessionAudit, SessionStatus};
use crate::services::scoring::{EndScore, RangeScore, SessionScore};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    pub member_id: Uuid,
    pub round_id: Uuid,
    pub shoot_date: NaiveDate,
}

/// One complete end for a range. The arrow count must match the range's
/// configured arrows-per-end exactly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordEndRequest {
    pub range_id: Uuid,
    pub arrows: Vec<ArrowValue>,
}

/// Recorder's single-arrow correction. `arrow_no` is 1-based within the end.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateArrowRequest {
    pub range_id: Uuid,

    #[validate(range(min = 1))]
    pub end_no: u32,

    #[validate(range(min = 1))]
    pub arrow_no: u32,

    pub value: ArrowValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusChangeRequest {
    pub status: SessionStatus,
    /// Recorder applying the change, for the audit trail.
    pub changed_by: Option<Uuid>,
}

/// Bulk recorder action: move every matching session of a competition to
/// `new_status`, skipping locked sessions and no-ops.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkStatusChangeRequest {
    pub competition_slug: String,
    /// Only sessions currently in one of these statuses are touched. Empty
    /// means no status filter.
    #[serde(default)]
    pub current_status: Vec<SessionStatus>,
    pub new_status: SessionStatus,
    pub changed_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkStatusChangeResponse {
    pub updated: usize,
    pub skipped: usize,
    pub locked: usize,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SessionHistoryFilter {
    pub member_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndResponse {
    pub end_id: Uuid,
    pub range_id: Uuid,
    pub end_no: u32,
    pub arrows: Vec<ArrowValue>,
}

impl From<&End> for EndResponse {
    fn from(end: &End) -> Self {
        Self {
            end_id: end.end_id,
            range_id: end.range_id,
            end_no: end.end_no,
            arrows: end.arrows.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub member_id: Uuid,
    pub round_id: Uuid,
    pub shoot_date: NaiveDate,
    pub status: SessionStatus,
    pub ends: Vec<EndResponse>,
    pub created_at: NaiveDateTime,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id,
            member_id: session.member_id,
            round_id: session.round_id,
            shoot_date: session.shoot_date,
            status: session.status,
            ends: session.ends.iter().map(EndResponse::from).collect(),
            created_at: session.created_at,
        }
    }
}

/// History row: completion progress plus the running total, the way the
/// recorder's session grid shows it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub shoot_date: NaiveDate,
    pub round_name: String,
    pub status: SessionStatus,
    pub ends_recorded: usize,
    pub total_ends: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndScoreResponse {
    pub end_no: u32,
    pub total: u32,
    pub x_count: u32,
    pub arrows_scored: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RangeScoreResponse {
    pub range_id: Uuid,
    pub distance_m: u32,
    pub total: u32,
    pub x_count: u32,
    pub ends: Vec<EndScoreResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreResponse {
    pub session_id: Uuid,
    pub ranges: Vec<RangeScoreResponse>,
    pub total: u32,
    pub x_count: u32,
}

impl ScoreResponse {
    pub fn new(session_id: Uuid, score: SessionScore) -> Self {
        Self {
            session_id,
            ranges: score.ranges.into_iter().map(range_score_response).collect(),
            total: score.total,
            x_count: score.x_count,
        }
    }
}

fn range_score_response(range: RangeScore) -> RangeScoreResponse {
    RangeScoreResponse {
        range_id: range.range_id,
        distance_m: range.distance_m,
        total: range.total,
        x_count: range.x_count,
        ends: range.ends.into_iter().map(end_score_response).collect(),
    }
}

fn end_score_response(end: EndScore) -> EndScoreResponse {
    EndScoreResponse {
        end_no: end.end_no,
        total: end.total,
        x_count: end.x_count,
        arrows_scored: end.arrows_scored,
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditResponse {
    pub audit_id: Uuid,
    pub session_id: Uuid,
    pub old_status: SessionStatus,
    pub new_status: SessionStatus,
    pub changed_by: Option<Uuid>,
    pub changed_at: NaiveDateTime,
}

impl From<&SessionAudit> for AuditResponse {
    fn from(audit: &SessionAudit) -> Self {
        Self {
            audit_id: audit.audit_id,
            session_id: audit.session_id,
            old_status: audit.old_status,
            new_status: audit.new_status,
            changed_by: audit.changed_by,
            changed_at: audit.changed_at,
        }
    }
}
