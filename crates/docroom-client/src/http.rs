//! JSON/HTTP implementation of [`DeliveryBackend`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use tracing::debug;
use uuid::Uuid;

use docroom_core::config::backend::BackendConfig;
use docroom_core::error::AppError;
use docroom_core::result::AppResult;
use docroom_entity::{
    FolderContents, LinkRecord, NdaSignature, SignedUrl, SignedUrlBatch, SignedUrlRequest,
    ViewerIdentity,
};

use crate::backend::DeliveryBackend;
use crate::dto::{
    NdaSignRequestDto, NdaSignResponseDto, PasswordVerifyRequestDto, PasswordVerifyResponseDto,
    SignedUrlBatchRequestDto, SignedUrlBatchResponseDto, SignedUrlRequestDto,
    SingleSignRequestDto, SingleSignResponseDto,
};

/// HTTP client for the managed backend.
#[derive(Debug, Clone)]
pub struct HttpDeliveryBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpDeliveryBackend {
    /// Build a client from configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("x-api-key", key),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder, what: &str) -> AppResult<reqwest::Response> {
        let response = self
            .apply_auth(req)
            .send()
            .await
            .map_err(|e| AppError::backend(format!("Backend request failed ({what}): {e}")))?;
        Ok(response)
    }

    fn check_status(response: &reqwest::Response, what: &str) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(AppError::backend(format!(
            "Backend returned {status} for {what}"
        )))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> AppResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::backend(format!("Invalid backend response ({what}): {e}")))
    }
}

#[async_trait]
impl DeliveryBackend for HttpDeliveryBackend {
    async fn fetch_link(&self, token: &str) -> AppResult<Option<LinkRecord>> {
        let what = "link resolution";
        let response = self
            .send(self.client.get(self.url(&format!("/links/{token}"))), what)
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::check_status(&response, what)?;
        let record: LinkRecord = Self::parse_json(response, what).await?;
        Ok(Some(record))
    }

    async fn fetch_folder_contents(&self, token: &str) -> AppResult<FolderContents> {
        let what = "folder contents";
        let response = self
            .send(
                self.client
                    .get(self.url(&format!("/links/{token}/contents"))),
                what,
            )
            .await?;
        Self::check_status(&response, what)?;
        Self::parse_json(response, what).await
    }

    async fn sign_urls_batch(&self, requests: &[SignedUrlRequest]) -> AppResult<SignedUrlBatch> {
        let what = "signed URL batch";
        let body = SignedUrlBatchRequestDto {
            requests: requests.iter().map(SignedUrlRequestDto::from).collect(),
        };
        debug!(count = requests.len(), "Requesting signed URL batch");

        let response = self
            .send(self.client.post(self.url("/urls/batch")).json(&body), what)
            .await?;
        Self::check_status(&response, what)?;
        let dto: SignedUrlBatchResponseDto = Self::parse_json(response, what).await?;
        Ok(dto.into())
    }

    async fn sign_url(&self, request: &SignedUrlRequest) -> AppResult<SignedUrl> {
        let what = "signed URL";
        let body = SingleSignRequestDto {
            storage_path: request.storage_path.clone(),
            is_video: request.is_video,
            expires_in: request.expires_in,
        };

        let response = self
            .send(self.client.post(self.url("/urls/sign")).json(&body), what)
            .await?;
        Self::check_status(&response, what)?;
        let dto: SingleSignResponseDto = Self::parse_json(response, what).await?;
        Ok(SignedUrl {
            storage_path: request.storage_path.clone(),
            url: dto.signed_url,
            expires_in: dto.expires_in,
            is_video: request.is_video,
        })
    }

    async fn record_view(&self, token: &str) -> AppResult<()> {
        let what = "view accounting";
        let response = self
            .send(
                self.client.post(self.url(&format!("/links/{token}/view"))),
                what,
            )
            .await?;
        Self::check_status(&response, what)
    }

    async fn verify_password(
        &self,
        token: &str,
        password: &str,
        viewer: &ViewerIdentity,
    ) -> AppResult<bool> {
        let what = "password verification";
        let body = PasswordVerifyRequestDto {
            token: token.to_string(),
            password: password.to_string(),
            viewer_name: viewer.name.clone(),
            viewer_email: viewer.email.clone(),
        };

        let response = self
            .send(
                self.client
                    .post(self.url(&format!("/links/{token}/password/verify")))
                    .json(&body),
                what,
            )
            .await?;

        // The backend signals a wrong password as 401 rather than an
        // application error.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(false);
        }
        Self::check_status(&response, what)?;
        let dto: PasswordVerifyResponseDto = Self::parse_json(response, what).await?;
        Ok(dto.verified)
    }

    async fn sign_nda(
        &self,
        link_id: Uuid,
        signature: &NdaSignature,
    ) -> AppResult<DateTime<Utc>> {
        let what = "NDA signature";
        let body = NdaSignRequestDto {
            link_id,
            signer_name: signature.signer_name.clone(),
            signer_email: signature.signer_email.clone(),
        };

        let response = self
            .send(
                self.client
                    .post(self.url(&format!("/links/{link_id}/nda")))
                    .json(&body),
                what,
            )
            .await?;
        Self::check_status(&response, what)?;
        let dto: NdaSignResponseDto = Self::parse_json(response, what).await?;
        Ok(dto.signed_at)
    }
}
