use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::models::{
    Category, Championship, Competition, CompetitionEntry, Member, Round, Session, SessionAudit,
};

/// The club registry tables. Reference data (categories) is write-rarely
/// administrative configuration; everything else is regular row data.
#[derive(Debug, Default)]
pub struct ClubState {
    pub members: HashMap<Uuid, Member>,
    pub rounds: HashMap<Uuid, Round>,
    pub sessions: HashMap<Uuid, Session>,
    pub categories: Vec<Category>,
    pub competitions: HashMap<Uuid, Competition>,
    pub entries: HashMap<Uuid, CompetitionEntry>,
    pub championships: HashMap<Uuid, Championship>,
    pub session_audit: Vec<SessionAudit>,
}

/// Handle to the in-memory club registry.
///
/// Cheap to clone; repositories borrow it per operation. A single lock
/// guards the whole registry so that multi-table writes (a status change and
/// its dependent competition-entry updates) are applied atomically.
#[derive(Debug, Clone, Default)]
pub struct ClubDb {
    state: Arc<RwLock<ClubState>>,
}

impl ClubDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, ClubState> {
        self.state.read().expect("club registry lock poisoned")
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, ClubState> {
        self.state.write().expect("club registry lock poisoned")
    }
}
