use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::{ClubDb, ClubState};
use crate::dto::session::{
    BulkStatusChangeRequest, BulkStatusChangeResponse, CreateSessionRequest, RecordEndRequest,
    SessionSummary, StatusChangeRequest, UpdateArrowRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{End, Session, SessionAudit, SessionStatus};
use crate::services::approval;
use crate::services::scoring::aggregate_session;

pub struct SessionRepository<'a> {
    db: &'a ClubDb,
}

impl<'a> SessionRepository<'a> {
    pub fn new(db: &'a ClubDb) -> Self {
        Self { db }
    }

    pub fn create(&self, request: &CreateSessionRequest) -> Result<Session> {
        let mut state = self.db.write();

        let member = state
            .members
            .get(&request.member_id)
            .ok_or(StorageError::NotFound)?;
        if member.is_recorder {
            return Err(StorageError::constraint("Recorders do not shoot sessions"));
        }
        if !state.rounds.contains_key(&request.round_id) {
            return Err(StorageError::NotFound);
        }

        let session = Session {
            session_id: Uuid::new_v4(),
            member_id: request.member_id,
            round_id: request.round_id,
            shoot_date: request.shoot_date,
            status: SessionStatus::Preliminary,
            ends: Vec::new(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        state.sessions.insert(session.session_id, session.clone());

        Ok(session)
    }

    pub fn get(&self, session_id: Uuid) -> Result<Session> {
        self.db
            .read()
            .sessions
            .get(&session_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    /// Appends the next end for a range. The arrow count must match the
    /// range configuration exactly; end numbers are assigned contiguously.
    pub fn record_end(&self, session_id: Uuid, request: &RecordEndRequest) -> Result<End> {
        let mut state = self.db.write();

        let session = state
            .sessions
            .get(&session_id)
            .ok_or(StorageError::NotFound)?;
        if !session.status.is_pending() {
            return Err(StorageError::Locked(format!(
                "session is {}",
                session.status
            )));
        }

        let round = state
            .rounds
            .get(&session.round_id)
            .ok_or(StorageError::NotFound)?;
        let range = round.range(request.range_id).ok_or(StorageError::NotFound)?;

        let expected = range.arrows_per_end as usize;
        if request.arrows.len() != expected {
            return Err(StorageError::InvalidArrowCount {
                expected,
                got: request.arrows.len(),
            });
        }

        let recorded = session.ends_for_range(request.range_id).len() as u32;
        if recorded >= range.ends_per_range {
            return Err(StorageError::constraint(format!(
                "Range already has all {} ends",
                range.ends_per_range
            )));
        }

        let end = End {
            end_id: Uuid::new_v4(),
            range_id: request.range_id,
            end_no: recorded + 1,
            arrows: request.arrows.clone(),
        };

        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or(StorageError::NotFound)?;
        session.ends.push(end.clone());

        Ok(end)
    }

    /// Recorder correction of a single arrow. Scores of Confirmed or
    /// Rejected sessions can no longer be touched.
    pub fn update_arrow(&self, session_id: Uuid, request: &UpdateArrowRequest) -> Result<End> {
        let mut state = self.db.write();

        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or(StorageError::NotFound)?;
        if !session.status.is_pending() {
            return Err(StorageError::Locked(format!(
                "session is {}",
                session.status
            )));
        }

        let end = session
            .ends
            .iter_mut()
            .find(|e| e.range_id == request.range_id && e.end_no == request.end_no)
            .ok_or(StorageError::NotFound)?;

        let index = (request.arrow_no - 1) as usize;
        if index >= end.arrows.len() {
            return Err(StorageError::InvalidArrowCount {
                expected: end.arrows.len(),
                got: request.arrow_no as usize,
            });
        }
        end.arrows[index] = request.value;

        Ok(end.clone())
    }

    /// A member's sessions, newest first, with completion progress and the
    /// running total.
    pub fn history(&self, member_id: Uuid) -> Result<Vec<SessionSummary>> {
        let state = self.db.read();

        if !state.members.contains_key(&member_id) {
            return Err(StorageError::NotFound);
        }

        let mut summaries = Vec::new();
        for session in state.sessions.values().filter(|s| s.member_id == member_id) {
            let round = state
                .rounds
                .get(&session.round_id)
                .ok_or(StorageError::NotFound)?;
            summaries.push(SessionSummary {
                session_id: session.session_id,
                shoot_date: session.shoot_date,
                round_name: round.name.clone(),
                status: session.status,
                ends_recorded: session.ends_recorded(),
                total_ends: round.total_ends(),
                total: aggregate_session(session, round).total,
            });
        }
        summaries.sort_by(|a, b| b.shoot_date.cmp(&a.shoot_date));

        Ok(summaries)
    }

    /// Applies a recorder's status change, writing an audit row. Sessions at
    /// `Final`/`Confirmed` lock once a competition they are entered into has
    /// ended.
    pub fn set_status(
        &self,
        session_id: Uuid,
        request: &StatusChangeRequest,
    ) -> Result<(Session, SessionAudit)> {
        let today = chrono::Utc::now().date_naive();
        let mut state = self.db.write();

        let locked_after = lock_date(&state, session_id);
        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or(StorageError::NotFound)?;

        let audit = approval::apply_transition(
            session,
            request.status,
            request.changed_by,
            locked_after,
            today,
        )?;
        let session = session.clone();
        state.session_audit.push(audit.clone());

        Ok((session, audit))
    }

    /// Moves every matching session of a competition to the requested
    /// status. Locked sessions and sessions where the transition does not
    /// apply are counted, not failed.
    pub fn bulk_set_status(
        &self,
        request: &BulkStatusChangeRequest,
    ) -> Result<BulkStatusChangeResponse> {
        let today = chrono::Utc::now().date_naive();
        let mut state = self.db.write();

        let competition = state
            .competitions
            .values()
            .find(|c| c.slug == request.competition_slug)
            .cloned()
            .ok_or(StorageError::NotFound)?;

        let session_ids: Vec<Uuid> = state
            .entries
            .values()
            .filter(|e| e.competition_id == competition.competition_id)
            .map(|e| e.session_id)
            .collect();

        let mut response = BulkStatusChangeResponse {
            updated: 0,
            skipped: 0,
            locked: 0,
        };

        for session_id in session_ids {
            let Some(session) = state.sessions.get_mut(&session_id) else {
                continue;
            };
            if !request.current_status.is_empty()
                && !request.current_status.contains(&session.status)
            {
                continue;
            }
            if session.status == request.new_status {
                response.skipped += 1;
                continue;
            }
            if approval::is_locked(session.status, Some(competition.end_date), today) {
                response.locked += 1;
                continue;
            }
            match approval::apply_transition(
                session,
                request.new_status,
                request.changed_by,
                Some(competition.end_date),
                today,
            ) {
                Ok(audit) => {
                    state.session_audit.push(audit);
                    response.updated += 1;
                }
                Err(StorageError::InvalidStatusTransition { .. }) => response.skipped += 1,
                Err(e) => return Err(e),
            }
        }

        Ok(response)
    }

    pub fn audit(&self, session_id: Uuid) -> Result<Vec<SessionAudit>> {
        let state = self.db.read();
        if !state.sessions.contains_key(&session_id) {
            return Err(StorageError::NotFound);
        }
        Ok(state
            .session_audit
            .iter()
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect())
    }
}

/// Earliest end date among competitions the session is entered into, if any.
fn lock_date(state: &ClubState, session_id: Uuid) -> Option<NaiveDate> {
    state
        .entries
        .values()
        .filter(|e| e.session_id == session_id)
        .filter_map(|e| state.competitions.get(&e.competition_id))
        .map(|c| c.end_date)
        .min()
}
