//! Secure link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a secure link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// The link is live.
    Active,
    /// The link was revoked by its owner.
    Revoked,
    /// The link was marked expired by the authoring surface.
    Expired,
}

/// What a granted viewer is allowed to do with the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// View in the browser only; download/copy affordances are suppressed.
    ViewOnly,
    /// Viewing and downloading are both allowed.
    Download,
}

/// The single content reference a link carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentRef {
    /// A single document.
    Document(Uuid),
    /// A named bundle of documents.
    Bundle(Uuid),
    /// A folder tree rooted at this folder.
    Folder(Uuid),
}

impl ContentRef {
    /// Short label for the referenced content kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Document(_) => "document",
            Self::Bundle(_) => "bundle",
            Self::Folder(_) => "folder",
        }
    }
}

/// A tokenized share link guarding a document, bundle, or folder.
///
/// Link records are authored elsewhere; this subsystem reads them and only
/// ever writes back view accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecureLink {
    /// Unique link identifier.
    pub id: Uuid,
    /// Opaque share token.
    pub token: String,
    /// Lifecycle status.
    pub status: LinkStatus,
    /// When the link expires (if set).
    pub expires_at: Option<DateTime<Utc>>,
    /// Maximum number of granted views (None = unlimited).
    pub max_views: Option<i32>,
    /// Number of views granted so far.
    pub current_views: i32,
    /// Whether a password challenge guards the link. The hash itself
    /// never leaves the backend.
    pub password_protected: bool,
    /// Whether an NDA must be signed before viewing.
    pub nda_required: bool,
    /// When the NDA was signed (if ever).
    pub nda_signed_at: Option<DateTime<Utc>>,
    /// What a granted viewer may do.
    pub access_level: AccessLevel,
    /// The single content reference this link carries.
    pub content: ContentRef,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// Last time a view was granted.
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl SecureLink {
    /// Whether the link is past its expiry time at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        if self.status == LinkStatus::Expired {
            return true;
        }
        matches!(self.expires_at, Some(expires) if expires <= now)
    }

    /// Whether the view budget is exhausted.
    pub fn views_exhausted(&self) -> bool {
        matches!(self.max_views, Some(max) if self.current_views >= max)
    }

    /// Whether downloads are allowed.
    pub fn allows_download(&self) -> bool {
        self.access_level == AccessLevel::Download
    }
}
