//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Password challenge submission. The password form also collects the
/// viewer identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordSubmitRequest {
    /// The share password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Viewer name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub viewer_name: String,
    /// Viewer email.
    #[validate(email(message = "A valid email is required"))]
    pub viewer_email: String,
}

/// Standalone viewer identification submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewerInfoRequest {
    /// Viewer name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Viewer email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

/// NDA signature submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NdaSignRequest {
    /// Name as signed.
    #[validate(length(min = 1, message = "Signer name is required"))]
    pub signer_name: String,
    /// Email as signed.
    #[validate(email(message = "A valid signer email is required"))]
    pub signer_email: String,
}

/// Query parameters for the contents endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentQuery {
    /// Selected folder (folder links).
    pub folder: Option<Uuid>,
    /// Selected document (bundles and folders).
    pub document: Option<Uuid>,
    /// Substring file-name filter.
    pub q: Option<String>,
    /// Content class filter (`pdf`, `image`, `video`, `audio`,
    /// `document`, `other`).
    pub class: Option<String>,
    /// Sort order (`name_asc`, `name_desc`, `created_asc`, `created_desc`,
    /// `class_grouped`).
    pub sort: Option<String>,
}
