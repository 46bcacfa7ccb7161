//! Gate access and challenge handlers.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use docroom_core::error::AppError;
use docroom_entity::{NdaSignature, ViewerIdentity};

use crate::dto::request::{NdaSignRequest, PasswordSubmitRequest, ViewerInfoRequest};
use crate::dto::response::{ApiResponse, GateResponse};
use crate::error::ApiError;
use crate::extractors::{MaybeSession, RequireSession};
use crate::state::AppState;

/// GET /api/v/{token} — open or refresh the gate for a share token.
pub async fn open_gate(
    State(state): State<AppState>,
    Path(token): Path<String>,
    MaybeSession(existing): MaybeSession,
) -> Result<Json<ApiResponse<GateResponse>>, ApiError> {
    let session = state.gate.open(&token, existing).await?;
    Ok(Json(ApiResponse::ok(GateResponse::from_session(&session))))
}

/// POST /api/v/{token}/password — submit the password challenge.
pub async fn submit_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    RequireSession(session_id): RequireSession,
    Json(req): Json<PasswordSubmitRequest>,
) -> Result<Json<ApiResponse<GateResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    check_token(&state, session_id, &token)?;

    let viewer = ViewerIdentity {
        name: req.viewer_name,
        email: req.viewer_email,
    };
    let session = state
        .gate
        .submit_password(session_id, &req.password, viewer)
        .await?;
    Ok(Json(ApiResponse::ok(GateResponse::from_session(&session))))
}

/// POST /api/v/{token}/viewer — submit viewer identification.
pub async fn submit_viewer(
    State(state): State<AppState>,
    Path(token): Path<String>,
    RequireSession(session_id): RequireSession,
    Json(req): Json<ViewerInfoRequest>,
) -> Result<Json<ApiResponse<GateResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    check_token(&state, session_id, &token)?;

    let viewer = ViewerIdentity {
        name: req.name,
        email: req.email,
    };
    let session = state.gate.submit_viewer(session_id, viewer).await?;
    Ok(Json(ApiResponse::ok(GateResponse::from_session(&session))))
}

/// POST /api/v/{token}/nda — submit an NDA signature.
pub async fn sign_nda(
    State(state): State<AppState>,
    Path(token): Path<String>,
    RequireSession(session_id): RequireSession,
    Json(req): Json<NdaSignRequest>,
) -> Result<Json<ApiResponse<GateResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    check_token(&state, session_id, &token)?;

    let signature = NdaSignature {
        signer_name: req.signer_name,
        signer_email: req.signer_email,
        signed_at: None,
    };
    let session = state.gate.sign_nda(session_id, signature).await?;
    Ok(Json(ApiResponse::ok(GateResponse::from_session(&session))))
}

/// A session must belong to the token it is used with.
fn check_token(state: &AppState, session_id: uuid::Uuid, token: &str) -> Result<(), ApiError> {
    let session = state.sessions.require(session_id)?;
    if session.token != token {
        return Err(ApiError(AppError::validation(
            "Session does not belong to this link",
        )));
    }
    Ok(())
}
