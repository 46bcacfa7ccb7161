//! Viewer identity and NDA signature models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who is looking at the content. Collected once per viewer session,
/// before anything is rendered, independent of password protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerIdentity {
    /// Visitor's name.
    pub name: String,
    /// Visitor's email address.
    pub email: String,
}

/// An NDA signature submitted by a viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NdaSignature {
    /// Name as signed.
    pub signer_name: String,
    /// Email as signed.
    pub signer_email: String,
    /// Timestamp assigned by the backend once recorded.
    pub signed_at: Option<DateTime<Utc>>,
}
