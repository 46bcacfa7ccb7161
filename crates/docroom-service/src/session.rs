//! In-memory viewer gate sessions.
//!
//! Sessions live in one process, like the URL cache, and expire passively:
//! an idle session is dropped on the first lookup after its timeout.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use docroom_core::error::AppError;
use docroom_core::result::AppResult;
use docroom_entity::{LinkContent, SecureLink, ViewerIdentity};

use crate::gate::machine::{ChallengeProgress, GateState};

/// One viewer's passage through the gate for one link.
#[derive(Debug, Clone)]
pub struct GateSession {
    /// Session identifier, carried by the presentation layer.
    pub id: Uuid,
    /// The share token this session is for.
    pub token: String,
    /// Current gate state.
    pub state: GateState,
    /// Snapshot of the link taken when the session was opened or refreshed.
    pub link: SecureLink,
    /// The content payload joined onto the link.
    pub content: LinkContent,
    /// Captured viewer identity, surviving failed password attempts.
    pub viewer: Option<ViewerIdentity>,
    /// The password was verified this session.
    pub password_verified: bool,
    /// The NDA was signed this session.
    pub nda_signed: bool,
    /// View accounting already ran for this session.
    pub view_recorded: bool,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Last activity (refreshed on every store write).
    pub updated_at: DateTime<Utc>,
}

impl GateSession {
    /// Create a fresh session for a link.
    pub fn new(token: impl Into<String>, link: SecureLink, content: LinkContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            token: token.into(),
            state: GateState::Checking,
            link,
            content,
            viewer: None,
            password_verified: false,
            nda_signed: false,
            view_recorded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The session's challenge progress, derived from captured facts.
    pub fn progress(&self) -> ChallengeProgress {
        ChallengeProgress {
            password_verified: self.password_verified,
            viewer_captured: self.viewer.is_some(),
            nda_signed: self.nda_signed,
        }
    }

    /// Error unless the session has reached `Granted`.
    pub fn require_granted(&self) -> AppResult<()> {
        match self.state {
            GateState::Granted => Ok(()),
            GateState::Denied(reason) => Err(reason.into_error()),
            GateState::PasswordRequired => {
                Err(AppError::validation("Password challenge not completed"))
            }
            GateState::ViewerInfoRequired => {
                Err(AppError::validation("Viewer identification not completed"))
            }
            GateState::NdaRequired => Err(AppError::nda_not_signed("NDA has not been signed")),
            GateState::Checking => Err(AppError::validation("Access checks still pending")),
        }
    }
}

/// Process-local store of gate sessions with passive idle expiry.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<Uuid, GateSession>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create an empty store with the given idle timeout.
    pub fn new(idle_timeout_seconds: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout: Duration::seconds(idle_timeout_seconds as i64),
        }
    }

    /// Fetch a live session. An idle-expired session is removed and
    /// reported as missing.
    pub fn get(&self, id: Uuid) -> Option<GateSession> {
        let expired = {
            let session = self.sessions.get(&id)?;
            session.updated_at + self.idle_timeout <= Utc::now()
        };
        if expired {
            self.sessions.remove(&id);
            debug!(session_id = %id, "Viewer session expired");
            return None;
        }
        self.sessions.get(&id).map(|s| s.clone())
    }

    /// Fetch a live session or fail with a session error.
    pub fn require(&self, id: Uuid) -> AppResult<GateSession> {
        self.get(id)
            .ok_or_else(|| AppError::session("Viewer session is missing or expired"))
    }

    /// Insert or update a session, refreshing its activity timestamp.
    pub fn save(&self, mut session: GateSession) -> GateSession {
        session.updated_at = Utc::now();
        self.sessions.insert(session.id, session.clone());
        session
    }

    /// Remove a session (terminal denial discovered mid-session).
    pub fn remove(&self, id: Uuid) {
        self.sessions.remove(&id);
    }

    /// Drop every idle-expired session. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        let cutoff = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, s| s.updated_at + self.idle_timeout > cutoff);
        before - self.sessions.len()
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
