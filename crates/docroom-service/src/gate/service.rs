//! The access gate service — runs the challenge sequence against the
//! backend and keeps per-viewer sessions current.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use docroom_client::DeliveryBackend;
use docroom_core::error::AppError;
use docroom_core::result::AppResult;
use docroom_entity::{NdaSignature, ViewerIdentity};

use crate::gate::machine::{self, GateState};
use crate::session::{GateSession, SessionStore};

/// Sequences the access challenges for shared links.
#[derive(Debug)]
pub struct AccessGate {
    backend: Arc<dyn DeliveryBackend>,
    sessions: Arc<SessionStore>,
}

impl AccessGate {
    /// Creates a new access gate.
    pub fn new(backend: Arc<dyn DeliveryBackend>, sessions: Arc<SessionStore>) -> Self {
        Self { backend, sessions }
    }

    /// Open (or refresh) the gate for a share token.
    ///
    /// Runs the static validity checks, then either fails with the terminal
    /// denial or returns a session positioned at the first outstanding
    /// challenge. An existing session id lets a returning viewer keep
    /// already-cleared challenges.
    pub async fn open(&self, token: &str, existing: Option<Uuid>) -> AppResult<GateSession> {
        if token.trim().is_empty() {
            return Err(AppError::link_not_found("Share token is missing"));
        }

        let record = self
            .backend
            .fetch_link(token)
            .await?
            .ok_or_else(|| AppError::link_not_found("Invalid link"))?;

        let session = match existing.and_then(|id| self.sessions.get(id)) {
            Some(mut session) if session.token == token => {
                session.link = record.link;
                session.content = record.content;
                session
            }
            _ => GateSession::new(token, record.link, record.content),
        };

        self.advance(session).await
    }

    /// Submit the password challenge. The password form also carries the
    /// viewer identity, which is captured before verification so it
    /// survives a failed attempt.
    pub async fn submit_password(
        &self,
        session_id: Uuid,
        password: &str,
        viewer: ViewerIdentity,
    ) -> AppResult<GateSession> {
        let mut session = self.sessions.require(session_id)?;
        if session.state != GateState::PasswordRequired {
            return Err(AppError::validation("No password challenge is pending"));
        }

        session.viewer = Some(viewer.clone());

        let verified = self
            .backend
            .verify_password(&session.token, password, &viewer)
            .await?;
        if !verified {
            self.sessions.save(session);
            return Err(AppError::password_incorrect("Incorrect password"));
        }

        session.password_verified = true;
        info!(token = %session.token, "Share password verified");
        self.advance(session).await
    }

    /// Submit the standalone viewer identification challenge.
    pub async fn submit_viewer(
        &self,
        session_id: Uuid,
        viewer: ViewerIdentity,
    ) -> AppResult<GateSession> {
        let mut session = self.sessions.require(session_id)?;
        if session.state != GateState::ViewerInfoRequired {
            return Err(AppError::validation("Viewer identification is not pending"));
        }

        session.viewer = Some(viewer);
        self.advance(session).await
    }

    /// Submit an NDA signature.
    pub async fn sign_nda(
        &self,
        session_id: Uuid,
        mut signature: NdaSignature,
    ) -> AppResult<GateSession> {
        let mut session = self.sessions.require(session_id)?;
        if session.state != GateState::NdaRequired {
            return Err(AppError::validation("No NDA signature is pending"));
        }

        let signed_at = self
            .backend
            .sign_nda(session.link.id, &signature)
            .await?;
        signature.signed_at = Some(signed_at);
        session.nda_signed = true;
        session.link.nda_signed_at = Some(signed_at);
        info!(token = %session.token, %signed_at, "NDA signed");
        self.advance(session).await
    }

    /// Re-run the dispatcher over the session and persist the result.
    ///
    /// A denial discovered here (revocation or expiry mid-session) removes
    /// the session and surfaces the terminal error.
    async fn advance(&self, mut session: GateSession) -> AppResult<GateSession> {
        let state = machine::evaluate(Some(&session.link), &session.progress(), Utc::now());

        if let GateState::Denied(reason) = state {
            self.sessions.remove(session.id);
            info!(token = %session.token, reason = ?reason, "Access denied");
            return Err(reason.into_error());
        }

        if session.state != state {
            info!(
                token = %session.token,
                from = session.state.as_str(),
                to = state.as_str(),
                "Gate state transition"
            );
        }
        session.state = state;

        if state == GateState::Granted {
            self.record_view_once(&mut session).await;
        }

        Ok(self.sessions.save(session))
    }

    /// View accounting: once per session, on reaching `Granted`.
    ///
    /// Best-effort read-then-increment with no concurrency guard; racing
    /// viewers near the view limit can both be admitted.
    async fn record_view_once(&self, session: &mut GateSession) {
        if session.view_recorded {
            return;
        }
        session.view_recorded = true;
        match self.backend.record_view(&session.token).await {
            Ok(()) => {
                session.link.current_views += 1;
                session.link.last_accessed_at = Some(Utc::now());
                info!(
                    token = %session.token,
                    views = session.link.current_views,
                    "View recorded"
                );
            }
            Err(e) => {
                warn!(token = %session.token, error = %e, "Failed to record view");
            }
        }
    }
}
