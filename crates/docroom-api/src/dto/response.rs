//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docroom_entity::AccessLevel;
use docroom_service::GateSession;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Facts about the link a viewer is allowed to see before being granted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSummary {
    /// `document`, `bundle`, or `folder`.
    pub content_kind: String,
    /// What a granted viewer may do.
    pub access_level: AccessLevel,
    /// When the link expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether a password challenge guards the link.
    pub password_protected: bool,
    /// Whether an NDA must be signed.
    pub nda_required: bool,
    /// The view budget, when limited.
    pub max_views: Option<i32>,
    /// Views consumed so far.
    pub current_views: i32,
}

/// Gate state payload returned by the access endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResponse {
    /// Session id to send back in `x-viewer-session`.
    pub session_id: Uuid,
    /// Current gate state (`password_required`, `viewer_info_required`,
    /// `nda_required`, `granted`).
    pub state: String,
    /// Link facts for the challenge screens.
    pub link: LinkSummary,
}

impl GateResponse {
    /// Build the payload from a gate session.
    pub fn from_session(session: &GateSession) -> Self {
        Self {
            session_id: session.id,
            state: session.state.as_str().to_string(),
            link: LinkSummary {
                content_kind: session.content.kind().to_string(),
                access_level: session.link.access_level,
                expires_at: session.link.expires_at,
                password_protected: session.link.password_protected,
                nda_required: session.link.nda_required,
                max_views: session.link.max_views,
                current_views: session.link.current_views,
            },
        }
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
