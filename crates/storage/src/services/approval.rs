use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Session, SessionAudit, SessionStatus};

/// Applies a recorder's status change to a session and produces the audit
/// row for it.
///
/// Transitions follow `SessionStatus::can_transition_to`. On top of that,
/// once the enclosing competition has ended (`locked_after`), sessions
/// already at `Final` or `Confirmed` are locked and cannot be touched.
pub fn apply_transition(
    session: &mut Session,
    new_status: SessionStatus,
    changed_by: Option<Uuid>,
    locked_after: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<SessionAudit> {
    if is_locked(session.status, locked_after, today) {
        return Err(StorageError::Locked(format!(
            "session is {} and the competition has ended",
            session.status
        )));
    }

    let old_status = session.status;
    if !old_status.can_transition_to(new_status) {
        return Err(StorageError::InvalidStatusTransition {
            from: old_status,
            to: new_status,
        });
    }

    session.status = new_status;
    tracing::info!(
        session_id = %session.session_id,
        %old_status,
        %new_status,
        "session status changed"
    );

    Ok(SessionAudit {
        audit_id: Uuid::new_v4(),
        session_id: session.session_id,
        old_status,
        new_status,
        changed_by,
        changed_at: chrono::Utc::now().naive_utc(),
    })
}

/// The recorder-protection rule: `Final` and `Confirmed` sessions lock once
/// the competition's end date has passed.
pub fn is_locked(
    status: SessionStatus,
    locked_after: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    match locked_after {
        Some(end_date) => {
            today > end_date && matches!(status, SessionStatus::Final | SessionStatus::Confirmed)
        }
        None => false,
    }
}
