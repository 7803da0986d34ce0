use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ArrowValue;

/// Lifecycle of a scoring session.
///
/// `Preliminary` and `Final` are both pending states on the way to recorder
/// sign-off; only `Confirmed` sessions count towards competition results,
/// championship standings and records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SessionStatus {
    Preliminary,
    Final,
    Confirmed,
    Rejected,
}

impl SessionStatus {
    pub fn is_pending(self) -> bool {
        matches!(self, SessionStatus::Preliminary | SessionStatus::Final)
    }

    /// Pending states move freely between each other and into `Confirmed` or
    /// `Rejected`; the latter two are terminal.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        self != next && self.is_pending()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Preliminary => "Preliminary",
            SessionStatus::Final => "Final",
            SessionStatus::Confirmed => "Confirmed",
            SessionStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group of arrows shot consecutively at one range. End numbers are
/// contiguous per range, starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct End {
    pub end_id: Uuid,
    pub range_id: Uuid,
    pub end_no: u32,
    pub arrows: Vec<ArrowValue>,
}

/// One archer shooting one round on one date. The session owns its ends, and
/// each end owns its arrows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub session_id: Uuid,
    pub member_id: Uuid,
    pub round_id: Uuid,
    pub shoot_date: NaiveDate,
    pub status: SessionStatus,
    pub ends: Vec<End>,
    pub created_at: NaiveDateTime,
}

impl Session {
    pub fn ends_for_range(&self, range_id: Uuid) -> Vec<&End> {
        let mut ends: Vec<&End> = self
            .ends
            .iter()
            .filter(|e| e.range_id == range_id)
            .collect();
        ends.sort_by_key(|e| e.end_no);
        ends
    }

    pub fn ends_recorded(&self) -> usize {
        self.ends.len()
    }
}

/// Audit trail row written for every applied status change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionAudit {
    pub audit_id: Uuid,
    pub session_id: Uuid,
    pub old_status: SessionStatus,
    pub new_status: SessionStatus,
    pub changed_by: Option<Uuid>,
    pub changed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_states() {
        assert!(SessionStatus::Preliminary.is_pending());
        assert!(SessionStatus::Final.is_pending());
        assert!(!SessionStatus::Confirmed.is_pending());
        assert!(!SessionStatus::Rejected.is_pending());
    }

    #[test]
    fn test_transitions_out_of_pending() {
        assert!(SessionStatus::Preliminary.can_transition_to(SessionStatus::Final));
        assert!(SessionStatus::Final.can_transition_to(SessionStatus::Preliminary));
        assert!(SessionStatus::Preliminary.can_transition_to(SessionStatus::Confirmed));
        assert!(SessionStatus::Final.can_transition_to(SessionStatus::Rejected));
    }

    #[test]
    fn test_confirmed_and_rejected_are_terminal() {
        assert!(!SessionStatus::Confirmed.can_transition_to(SessionStatus::Preliminary));
        assert!(!SessionStatus::Confirmed.can_transition_to(SessionStatus::Rejected));
        assert!(!SessionStatus::Rejected.can_transition_to(SessionStatus::Confirmed));
    }

    #[test]
    fn test_no_self_transition() {
        assert!(!SessionStatus::Preliminary.can_transition_to(SessionStatus::Preliminary));
    }
}
