//! Configurable in-memory backend for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use docroom_core::error::AppError;
use docroom_core::result::AppResult;
use docroom_client::DeliveryBackend;
use docroom_entity::{
    FolderContents, LinkRecord, NdaSignature, SignedUrl, SignedUrlBatch, SignedUrlRequest,
    ViewerIdentity,
};

/// A scriptable backend double. Every knob defaults to "succeed".
#[derive(Debug, Default)]
pub struct MockBackend {
    /// Link records by token.
    pub links: Mutex<HashMap<String, LinkRecord>>,
    /// Folder contents by token.
    pub folder_contents: Mutex<HashMap<String, FolderContents>>,
    /// The password that verifies, per token.
    pub passwords: Mutex<HashMap<String, String>>,
    /// Number of batch signing exchanges performed.
    pub batch_calls: AtomicUsize,
    /// Sizes of each batch exchange, in order.
    pub batch_sizes: Mutex<Vec<usize>>,
    /// Number of single signing requests performed.
    pub single_calls: AtomicUsize,
    /// Single signing attempts per storage path.
    pub single_attempts: Mutex<HashMap<String, u32>>,
    /// Number of view-accounting calls performed.
    pub view_calls: AtomicUsize,
    /// Fail every batch exchange with a transport-style error.
    pub fail_batch: AtomicBool,
    /// Storage paths silently omitted from batch responses.
    pub batch_missing: Mutex<HashSet<String>>,
    /// Remaining single-signing failures per storage path.
    pub single_failures: Mutex<HashMap<String, u32>>,
    /// TTL declared in signing responses; `None` echoes the request hint.
    pub response_ttl: Mutex<Option<u64>>,
    /// Fail view accounting.
    pub fail_record_view: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_link(&self, record: LinkRecord) {
        self.links
            .lock()
            .unwrap()
            .insert(record.link.token.clone(), record);
    }

    pub fn set_folder_contents(&self, token: &str, contents: FolderContents) {
        self.folder_contents
            .lock()
            .unwrap()
            .insert(token.to_string(), contents);
    }

    pub fn set_password(&self, token: &str, password: &str) {
        self.passwords
            .lock()
            .unwrap()
            .insert(token.to_string(), password.to_string());
    }

    /// Make the next `failures` single-signing calls for `path` fail.
    pub fn fail_single(&self, path: &str, failures: u32) {
        self.single_failures
            .lock()
            .unwrap()
            .insert(path.to_string(), failures);
    }

    fn ttl_for(&self, hint: u64) -> u64 {
        self.response_ttl.lock().unwrap().unwrap_or(hint)
    }

    fn signed(&self, req: &SignedUrlRequest, via: &str) -> SignedUrl {
        SignedUrl {
            storage_path: req.storage_path.clone(),
            url: format!("https://cdn.test/{}?sig={via}", req.storage_path),
            expires_in: self.ttl_for(req.expires_in),
            is_video: req.is_video,
        }
    }
}

#[async_trait]
impl DeliveryBackend for MockBackend {
    async fn fetch_link(&self, token: &str) -> AppResult<Option<LinkRecord>> {
        Ok(self.links.lock().unwrap().get(token).cloned())
    }

    async fn fetch_folder_contents(&self, token: &str) -> AppResult<FolderContents> {
        self.folder_contents
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::backend("No folder contents scripted for token"))
    }

    async fn sign_urls_batch(&self, requests: &[SignedUrlRequest]) -> AppResult<SignedUrlBatch> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(requests.len());

        if self.fail_batch.load(Ordering::SeqCst) {
            return Err(AppError::backend("Batch signing endpoint unavailable"));
        }

        let missing = self.batch_missing.lock().unwrap();
        let signed_urls: Vec<SignedUrl> = requests
            .iter()
            .filter(|r| !missing.contains(&r.storage_path))
            .map(|r| self.signed(r, "batch"))
            .collect();
        Ok(SignedUrlBatch {
            total_requested: requests.len(),
            total_success: signed_urls.len(),
            signed_urls,
        })
    }

    async fn sign_url(&self, request: &SignedUrlRequest) -> AppResult<SignedUrl> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .single_attempts
            .lock()
            .unwrap()
            .entry(request.storage_path.clone())
            .or_insert(0) += 1;

        let mut failures = self.single_failures.lock().unwrap();
        if let Some(remaining) = failures.get_mut(&request.storage_path) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(AppError::backend("Single signing failed"));
            }
        }
        Ok(self.signed(request, "single"))
    }

    async fn record_view(&self, _token: &str) -> AppResult<()> {
        self.view_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_record_view.load(Ordering::SeqCst) {
            return Err(AppError::backend("View accounting unavailable"));
        }
        Ok(())
    }

    async fn verify_password(
        &self,
        token: &str,
        password: &str,
        _viewer: &ViewerIdentity,
    ) -> AppResult<bool> {
        let passwords = self.passwords.lock().unwrap();
        Ok(passwords.get(token).is_some_and(|p| p == password))
    }

    async fn sign_nda(
        &self,
        _link_id: Uuid,
        _signature: &NdaSignature,
    ) -> AppResult<DateTime<Utc>> {
        Ok(Utc::now())
    }
}

/// Entity fixtures shared across service tests.
pub mod fixtures {
    use chrono::Utc;
    use uuid::Uuid;

    use docroom_entity::{
        AccessLevel, Bundle, ContentRef, Folder, LinkContent, LinkRecord, LinkStatus,
        SecureDocument, SecureLink,
    };

    pub fn document(name: &str, mime: Option<&str>, folder_id: Option<Uuid>) -> SecureDocument {
        SecureDocument {
            id: Uuid::new_v4(),
            storage_path: format!("vault/{name}"),
            file_name: name.to_string(),
            mime_type: mime.map(str::to_string),
            description: None,
            folder_id,
            size_bytes: Some(1024),
            created_at: Utc::now(),
        }
    }

    pub fn link(token: &str, content: ContentRef) -> SecureLink {
        SecureLink {
            id: Uuid::new_v4(),
            token: token.to_string(),
            status: LinkStatus::Active,
            expires_at: None,
            max_views: None,
            current_views: 0,
            password_protected: false,
            nda_required: false,
            nda_signed_at: None,
            access_level: AccessLevel::Download,
            content,
            created_at: Utc::now(),
            last_accessed_at: None,
        }
    }

    pub fn document_record(token: &str, doc: SecureDocument) -> LinkRecord {
        LinkRecord {
            link: link(token, ContentRef::Document(doc.id)),
            content: LinkContent::Document(doc),
        }
    }

    pub fn bundle_record(token: &str, name: &str, documents: Vec<SecureDocument>) -> LinkRecord {
        let bundle = Bundle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            documents,
        };
        LinkRecord {
            link: link(token, ContentRef::Bundle(bundle.id)),
            content: LinkContent::Bundle(bundle),
        }
    }

    pub fn folder_record(token: &str, folder_id: Uuid) -> LinkRecord {
        LinkRecord {
            link: link(token, ContentRef::Folder(folder_id)),
            content: LinkContent::Folder { folder_id },
        }
    }

    pub fn folder(id: Uuid, parent_id: Option<Uuid>, name: &str) -> Folder {
        Folder {
            id,
            parent_id,
            name: name.to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
