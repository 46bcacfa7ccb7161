//! The gate state machine: one enumerated state, one dispatcher.

use chrono::{DateTime, Utc};

use docroom_core::error::AppError;
use docroom_entity::SecureLink;

/// Why a link was denied before any challenge ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No token, or no record behind it.
    Invalid,
    /// The link was revoked by its owner.
    Revoked,
    /// The link is past its expiry.
    Expired,
    /// The view budget is exhausted.
    MaxViewsExceeded,
}

impl DenialReason {
    /// The terminal error surfaced for this denial.
    pub fn into_error(self) -> AppError {
        match self {
            Self::Invalid => AppError::link_not_found("Invalid link"),
            Self::Revoked => AppError::link_revoked("This link has been revoked"),
            Self::Expired => AppError::link_expired("This link has expired"),
            Self::MaxViewsExceeded => {
                AppError::max_views_exceeded("This link has reached its view limit")
            }
        }
    }
}

/// The state of a viewer's passage through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Static validity checks are running.
    Checking,
    /// A validity check failed; terminal.
    Denied(DenialReason),
    /// The link carries a password that has not been verified.
    PasswordRequired,
    /// The viewer has not identified themselves yet.
    ViewerInfoRequired,
    /// The link requires an NDA that has not been signed.
    NdaRequired,
    /// All challenges passed; content may be rendered.
    Granted,
}

impl GateState {
    /// Stable string form for responses and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Denied(_) => "denied",
            Self::PasswordRequired => "password_required",
            Self::ViewerInfoRequired => "viewer_info_required",
            Self::NdaRequired => "nda_required",
            Self::Granted => "granted",
        }
    }
}

/// How far the viewer has progressed through the challenges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChallengeProgress {
    /// The link password was verified this session.
    pub password_verified: bool,
    /// A viewer identity has been captured (via either capture path).
    pub viewer_captured: bool,
    /// The NDA was signed this session.
    pub nda_signed: bool,
}

/// The single dispatcher: given the link and the session's challenge
/// progress, compute the current gate state.
///
/// Checks run in a fixed order; the first outstanding one wins. A denial
/// always precedes every challenge, so a correct password can never rescue
/// an exhausted or revoked link.
pub fn evaluate(
    link: Option<&SecureLink>,
    progress: &ChallengeProgress,
    now: DateTime<Utc>,
) -> GateState {
    let Some(link) = link else {
        return GateState::Denied(DenialReason::Invalid);
    };

    if let Some(reason) = static_denial(link, now) {
        return GateState::Denied(reason);
    }

    if link.password_protected && !progress.password_verified {
        return GateState::PasswordRequired;
    }

    if !progress.viewer_captured {
        return GateState::ViewerInfoRequired;
    }

    if link.nda_required && link.nda_signed_at.is_none() && !progress.nda_signed {
        return GateState::NdaRequired;
    }

    GateState::Granted
}

/// The static validity checks, in evaluation order.
pub fn static_denial(link: &SecureLink, now: DateTime<Utc>) -> Option<DenialReason> {
    use docroom_entity::LinkStatus;

    if link.status == LinkStatus::Revoked {
        return Some(DenialReason::Revoked);
    }
    if link.is_expired(now) {
        return Some(DenialReason::Expired);
    }
    if link.views_exhausted() {
        return Some(DenialReason::MaxViewsExceeded);
    }
    None
}
