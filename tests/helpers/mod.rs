//! Shared test harness: a scripted backend plus a running server.

// Each test crate compiles this module separately and uses a different
// subset of it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use docroom_api::AppState;
use docroom_client::DeliveryBackend;
use docroom_core::config::AppConfig;
use docroom_core::error::AppError;
use docroom_core::result::AppResult;
use docroom_entity::{
    AccessLevel, Bundle, ContentRef, Folder, FolderContents, LinkContent, LinkRecord, LinkStatus,
    NdaSignature, SecureDocument, SecureLink, SignedUrl, SignedUrlBatch, SignedUrlRequest,
    ViewerIdentity,
};

/// Scripted backend double for end-to-end tests.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub links: Mutex<HashMap<String, LinkRecord>>,
    pub folder_contents: Mutex<HashMap<String, FolderContents>>,
    pub passwords: Mutex<HashMap<String, String>>,
    pub view_calls: AtomicUsize,
    pub batch_calls: AtomicUsize,
    pub single_calls: AtomicUsize,
    pub fail_batch: AtomicBool,
}

impl MockBackend {
    pub fn add_link(&self, record: LinkRecord) {
        self.links
            .lock()
            .unwrap()
            .insert(record.link.token.clone(), record);
    }

    pub fn set_password(&self, token: &str, password: &str) {
        self.passwords
            .lock()
            .unwrap()
            .insert(token.to_string(), password.to_string());
    }

    pub fn set_folder_contents(&self, token: &str, contents: FolderContents) {
        self.folder_contents
            .lock()
            .unwrap()
            .insert(token.to_string(), contents);
    }

    fn signed(req: &SignedUrlRequest, via: &str) -> SignedUrl {
        SignedUrl {
            storage_path: req.storage_path.clone(),
            url: format!("https://cdn.test/{}?sig={via}", req.storage_path),
            expires_in: req.expires_in,
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
            .ok_or_else(|| AppError::backend("No folder contents scripted"))
    }

    async fn sign_urls_batch(&self, requests: &[SignedUrlRequest]) -> AppResult<SignedUrlBatch> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_batch.load(Ordering::SeqCst) {
            return Err(AppError::backend("Batch signing unavailable"));
        }
        let signed_urls: Vec<SignedUrl> =
            requests.iter().map(|r| Self::signed(r, "batch")).collect();
        Ok(SignedUrlBatch {
            total_requested: requests.len(),
            total_success: signed_urls.len(),
            signed_urls,
        })
    }

    async fn sign_url(&self, request: &SignedUrlRequest) -> AppResult<SignedUrl> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::signed(request, "single"))
    }

    async fn record_view(&self, _token: &str) -> AppResult<()> {
        self.view_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn verify_password(
        &self,
        token: &str,
        password: &str,
        _viewer: &ViewerIdentity,
    ) -> AppResult<bool> {
        Ok(self
            .passwords
            .lock()
            .unwrap()
            .get(token)
            .is_some_and(|p| p == password))
    }

    async fn sign_nda(
        &self,
        _link_id: Uuid,
        _signature: &NdaSignature,
    ) -> AppResult<DateTime<Utc>> {
        Ok(Utc::now())
    }
}

/// A DocRoom server running against a scripted backend.
pub struct TestApp {
    pub base_url: String,
    pub backend: Arc<MockBackend>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = Arc::new(MockBackend::default());
        let mut config = AppConfig::default();
        config.delivery.fallback_base_delay_ms = 1;

        let state = AppState::build(config, Arc::clone(&backend) as Arc<dyn DeliveryBackend>);
        let app = docroom_api::build_app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server died");
        });

        Self {
            base_url: format!("http://{addr}/api"),
            backend,
            client: reqwest::Client::new(),
        }
    }

    pub async fn open(&self, token: &str, session: Option<&str>) -> reqwest::Response {
        let mut req = self.client.get(format!("{}/v/{token}", self.base_url));
        if let Some(id) = session {
            req = req.header("x-viewer-session", id);
        }
        req.send().await.expect("request failed")
    }

    pub async fn post_json(
        &self,
        path: &str,
        session: &str,
        body: serde_json::Value,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .header("x-viewer-session", session)
            .json(&body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn contents(&self, token: &str, session: &str, query: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/v/{token}/contents{query}", self.base_url))
            .header("x-viewer-session", session)
            .send()
            .await
            .expect("request failed")
    }
}

// ── Fixtures ───────────────────────────────────────────────

pub fn document(name: &str, mime: Option<&str>, folder_id: Option<Uuid>) -> SecureDocument {
    SecureDocument {
        id: Uuid::new_v4(),
        storage_path: format!("vault/{name}"),
        file_name: name.to_string(),
        mime_type: mime.map(str::to_string),
        description: None,
        folder_id,
        size_bytes: Some(2048),
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

/// Pull `data.session_id` out of a gate response body.
pub fn session_id(body: &serde_json::Value) -> String {
    body["data"]["session_id"]
        .as_str()
        .expect("missing session_id")
        .to_string()
}
