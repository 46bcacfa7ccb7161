//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use docroom_core::error::AppError;

use crate::error::ApiError;

/// Header carrying the viewer session id.
pub const SESSION_HEADER: &str = "x-viewer-session";

/// Optional viewer session id from `x-viewer-session`.
///
/// Present on follow-up calls; absent on a first visit. A malformed id is
/// rejected rather than silently treated as a new visitor.
#[derive(Debug, Clone, Copy)]
pub struct MaybeSession(pub Option<Uuid>);

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(SESSION_HEADER) {
            None => Ok(Self(None)),
            Some(value) => {
                let id = value
                    .to_str()
                    .ok()
                    .and_then(|s| s.parse::<Uuid>().ok())
                    .ok_or_else(|| {
                        ApiError(AppError::validation("Malformed x-viewer-session header"))
                    })?;
                Ok(Self(Some(id)))
            }
        }
    }
}

/// Required viewer session id from `x-viewer-session`.
#[derive(Debug, Clone, Copy)]
pub struct RequireSession(pub Uuid);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeSession(id) = MaybeSession::from_request_parts(parts, state).await?;
        let id = id.ok_or_else(|| {
            ApiError(AppError::session("Missing x-viewer-session header"))
        })?;
        Ok(Self(id))
    }
}
