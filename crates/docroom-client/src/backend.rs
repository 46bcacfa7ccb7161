//! The delivery backend trait — every interface this subsystem consumes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use docroom_core::result::AppResult;
use docroom_entity::{
    FolderContents, LinkRecord, NdaSignature, SignedUrl, SignedUrlBatch, SignedUrlRequest,
    ViewerIdentity,
};

/// Everything the managed backend does for this subsystem.
///
/// All calls are read-only except [`record_view`](Self::record_view)
/// (view accounting), [`verify_password`](Self::verify_password)
/// (server-side identity capture), and [`sign_nda`](Self::sign_nda).
#[async_trait]
pub trait DeliveryBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Resolve a share token to its link record, joined with the
    /// document / bundle / folder it references. `None` when the token
    /// has no record.
    async fn fetch_link(&self, token: &str) -> AppResult<Option<LinkRecord>>;

    /// Fetch the flattened contents of a folder-shared link. The backend
    /// performs the recursive expansion server-side.
    async fn fetch_folder_contents(&self, token: &str) -> AppResult<FolderContents>;

    /// One consolidated signing exchange for a set of storage references.
    /// Items absent from the response failed to sign.
    async fn sign_urls_batch(&self, requests: &[SignedUrlRequest]) -> AppResult<SignedUrlBatch>;

    /// Sign a single storage reference. Fallback path only.
    async fn sign_url(&self, request: &SignedUrlRequest) -> AppResult<SignedUrl>;

    /// Increment the link's view count and stamp `last_accessed_at`.
    /// Called once per granted session.
    async fn record_view(&self, token: &str) -> AppResult<()>;

    /// Verify the link password, capturing the viewer identity server-side
    /// on success. Returns `false` for an incorrect password.
    async fn verify_password(
        &self,
        token: &str,
        password: &str,
        viewer: &ViewerIdentity,
    ) -> AppResult<bool>;

    /// Record an NDA signature for a link. Returns the signed timestamp.
    async fn sign_nda(&self, link_id: Uuid, signature: &NdaSignature)
    -> AppResult<DateTime<Utc>>;
}
