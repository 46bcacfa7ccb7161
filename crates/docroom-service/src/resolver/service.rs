//! Content resolution service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use docroom_client::DeliveryBackend;
use docroom_core::config::delivery::DeliveryConfig;
use docroom_core::error::AppError;
use docroom_core::result::AppResult;
use docroom_entity::{Bundle, SecureDocument, SecureLink, SignedUrlRequest};

use crate::folder::{FolderTreeIndex, filter_by_class, filter_by_name, sort_documents};
use crate::resolver::expiry::url_ttl_seconds;
use crate::resolver::model::{
    AccessMeta, ContentSelection, ResolvedContent, ResolvedDocument, ResolvedView,
};
use crate::session::GateSession;
use crate::urls::{UrlOrchestrator, UrlOutcome};

/// Resolves a granted session's content into URL-bearing documents.
#[derive(Debug)]
pub struct ContentResolver {
    backend: Arc<dyn DeliveryBackend>,
    orchestrator: Arc<UrlOrchestrator>,
    config: DeliveryConfig,
}

impl ContentResolver {
    /// Creates a new content resolver.
    pub fn new(
        backend: Arc<dyn DeliveryBackend>,
        orchestrator: Arc<UrlOrchestrator>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            backend,
            orchestrator,
            config,
        }
    }

    /// Resolve the session's content. `Granted` sessions only.
    pub async fn resolve(
        &self,
        session: &GateSession,
        selection: &ContentSelection,
    ) -> AppResult<ResolvedView> {
        session.require_granted()?;

        let content = match &session.content {
            docroom_entity::LinkContent::Document(document) => {
                self.resolve_document(&session.link, document).await?
            }
            docroom_entity::LinkContent::Bundle(bundle) => {
                self.resolve_bundle(&session.link, bundle, selection).await?
            }
            docroom_entity::LinkContent::Folder { .. } => {
                self.resolve_folder(session, selection).await?
            }
        };

        Ok(ResolvedView {
            access: AccessMeta::from(&session.link),
            content,
        })
    }

    /// Single document: a failed resolution leaves nothing to show.
    async fn resolve_document(
        &self,
        link: &SecureLink,
        document: &SecureDocument,
    ) -> AppResult<ResolvedContent> {
        let request = self.request_for(link, document);
        let outcomes = self.orchestrator.resolve_urls(&[request]).await;

        let resolved = self
            .take_resolved(&outcomes, document)
            .ok_or_else(|| {
                AppError::content_unavailable("The document could not be prepared for viewing")
            })?;
        Ok(ResolvedContent::Document { document: resolved })
    }

    /// Bundle: unresolved documents are dropped, an empty result is fatal.
    async fn resolve_bundle(
        &self,
        link: &SecureLink,
        bundle: &Bundle,
        selection: &ContentSelection,
    ) -> AppResult<ResolvedContent> {
        if bundle.documents.is_empty() {
            return Err(AppError::content_empty("This bundle contains no documents"));
        }

        let requests: Vec<SignedUrlRequest> = bundle
            .documents
            .iter()
            .map(|d| self.request_for(link, d))
            .collect();
        let outcomes = self.orchestrator.resolve_urls(&requests).await;

        let documents: Vec<ResolvedDocument> = bundle
            .documents
            .iter()
            .filter_map(|d| self.take_resolved(&outcomes, d))
            .collect();

        if documents.is_empty() {
            return Err(AppError::content_unavailable(
                "No document in this bundle could be prepared for viewing",
            ));
        }

        let selected_document = selection
            .document
            .filter(|id| documents.iter().any(|d| d.document.id == *id));

        Ok(ResolvedContent::Bundle {
            id: bundle.id,
            name: bundle.name.clone(),
            documents,
            selected_document,
        })
    }

    /// Folder: expand the tree, resolve every discovered document in one
    /// exchange, then apply the viewer's selection, filters, and sort.
    async fn resolve_folder(
        &self,
        session: &GateSession,
        selection: &ContentSelection,
    ) -> AppResult<ResolvedContent> {
        let contents = self.backend.fetch_folder_contents(&session.token).await?;
        let index = FolderTreeIndex::build(contents, self.config.max_folder_depth);

        let all_documents = index.all_documents();
        if all_documents.is_empty() {
            return Err(AppError::content_empty("This folder contains no documents"));
        }

        let requests: Vec<SignedUrlRequest> = all_documents
            .iter()
            .map(|d| self.request_for(&session.link, d))
            .collect();
        let outcomes = self.orchestrator.resolve_urls(&requests).await;

        let tree_resolved = outcomes
            .values()
            .filter(|o| o.resolved().is_some())
            .count();
        if tree_resolved == 0 {
            return Err(AppError::content_unavailable(
                "No document in this folder could be prepared for viewing",
            ));
        }

        let selected_folder = match selection.folder {
            Some(id) if index.contains(id) => id,
            Some(id) => {
                return Err(AppError::validation(format!(
                    "Unknown folder selection: {id}"
                )));
            }
            None => index.root_id(),
        };

        let mut visible = index.documents_for(selected_folder);
        if let Some(query) = selection.query.as_deref() {
            visible = filter_by_name(&visible, query);
        }
        if let Some(class) = selection.class {
            visible = filter_by_class(&visible, class);
        }
        sort_documents(&mut visible, selection.sort.unwrap_or_default());

        let documents: Vec<ResolvedDocument> = visible
            .iter()
            .filter_map(|d| self.take_resolved(&outcomes, d))
            .collect();

        debug!(
            token = %session.token,
            folders = index.folders().len(),
            selected = %selected_folder,
            shown = documents.len(),
            "Folder contents resolved"
        );

        Ok(ResolvedContent::Folder {
            root_folder: index.root().clone(),
            folders: index.folders(),
            selected_folder,
            documents,
        })
    }

    /// Build the signing request for one document under one link.
    fn request_for(&self, link: &SecureLink, document: &SecureDocument) -> SignedUrlRequest {
        let class = document.file_class();
        SignedUrlRequest {
            storage_path: document.storage_path.clone(),
            is_video: class.is_video(),
            expires_in: url_ttl_seconds(class, link.expires_at, &self.config, Utc::now()),
        }
    }

    /// Pull a document's outcome out of the result map; log and drop
    /// failures.
    fn take_resolved(
        &self,
        outcomes: &HashMap<String, UrlOutcome>,
        document: &SecureDocument,
    ) -> Option<ResolvedDocument> {
        match outcomes.get(&document.storage_path) {
            Some(UrlOutcome::Resolved(signed)) => Some(ResolvedDocument {
                document: document.clone(),
                file_class: document.file_class(),
                url: signed.url.clone(),
                url_expires_in: signed.expires_in,
            }),
            Some(UrlOutcome::Failed(reason)) => {
                warn!(
                    document_id = %document.id,
                    storage_path = %document.storage_path,
                    %reason,
                    "Dropping document without a URL"
                );
                None
            }
            None => None,
        }
    }
}
