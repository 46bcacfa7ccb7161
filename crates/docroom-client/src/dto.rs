//! Wire DTOs for the signing, password, and NDA endpoints.
//!
//! The backend speaks camelCase JSON on these endpoints; link and folder
//! payloads are exchanged in the entity serde forms directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docroom_entity::{SignedUrl, SignedUrlBatch, SignedUrlRequest};

/// One item of a signing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequestDto {
    /// Opaque storage path.
    pub storage_path: String,
    /// Whether the content is video.
    pub is_video: bool,
    /// Requested validity window in seconds.
    pub expires_in: u64,
}

impl From<&SignedUrlRequest> for SignedUrlRequestDto {
    fn from(req: &SignedUrlRequest) -> Self {
        Self {
            storage_path: req.storage_path.clone(),
            is_video: req.is_video,
            expires_in: req.expires_in,
        }
    }
}

/// Body of the consolidated signing exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlBatchRequestDto {
    /// All items to sign.
    pub requests: Vec<SignedUrlRequestDto>,
}

/// One signed item of a batch response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlDto {
    /// The storage path the URL was issued for.
    pub storage_path: String,
    /// The fetchable URL.
    pub signed_url: String,
    /// Declared validity window in seconds.
    pub expires_in: u64,
    /// Whether the content is video.
    pub is_video: bool,
}

impl From<SignedUrlDto> for SignedUrl {
    fn from(dto: SignedUrlDto) -> Self {
        Self {
            storage_path: dto.storage_path,
            url: dto.signed_url,
            expires_in: dto.expires_in,
            is_video: dto.is_video,
        }
    }
}

/// Response of the consolidated signing exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlBatchResponseDto {
    /// Successfully signed items.
    pub signed_urls: Vec<SignedUrlDto>,
    /// How many items were requested.
    pub total_requested: usize,
    /// How many items were signed.
    pub total_success: usize,
}

impl From<SignedUrlBatchResponseDto> for SignedUrlBatch {
    fn from(dto: SignedUrlBatchResponseDto) -> Self {
        Self {
            signed_urls: dto.signed_urls.into_iter().map(SignedUrl::from).collect(),
            total_requested: dto.total_requested,
            total_success: dto.total_success,
        }
    }
}

/// Body of the single-item signing fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleSignRequestDto {
    /// Opaque storage path.
    pub storage_path: String,
    /// Whether the content is video.
    pub is_video: bool,
    /// Requested validity window in seconds.
    pub expires_in: u64,
}

/// Response of the single-item signing fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleSignResponseDto {
    /// The fetchable URL.
    pub signed_url: String,
    /// Declared validity window in seconds.
    pub expires_in: u64,
}

/// Body of a password verification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordVerifyRequestDto {
    /// The share token.
    pub token: String,
    /// The submitted password.
    pub password: String,
    /// Viewer name captured by the password form.
    pub viewer_name: String,
    /// Viewer email captured by the password form.
    pub viewer_email: String,
}

/// Response of a password verification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordVerifyResponseDto {
    /// Whether the password matched.
    pub verified: bool,
}

/// Body of an NDA signature call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdaSignRequestDto {
    /// The link being signed for.
    pub link_id: Uuid,
    /// Name as signed.
    pub signer_name: String,
    /// Email as signed.
    pub signer_email: String,
}

/// Response of an NDA signature call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdaSignResponseDto {
    /// Timestamp the backend recorded for the signature.
    pub signed_at: DateTime<Utc>,
}
