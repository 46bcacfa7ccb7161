//! Resolved contents handler.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};

use docroom_core::error::AppError;
use docroom_core::types::{DocumentSort, FileClass};
use docroom_service::{ContentSelection, ResolvedView};

use crate::dto::request::ContentQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::RequireSession;
use crate::state::AppState;

/// GET /api/v/{token}/contents — resolved content for a granted session.
pub async fn get_contents(
    State(state): State<AppState>,
    Path(token): Path<String>,
    RequireSession(session_id): RequireSession,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ApiResponse<ResolvedView>>, ApiError> {
    let session = state.sessions.require(session_id)?;
    if session.token != token {
        return Err(ApiError(AppError::validation(
            "Session does not belong to this link",
        )));
    }

    let selection = selection_from_query(query)?;
    let view = state.resolver.resolve(&session, &selection).await?;
    Ok(Json(ApiResponse::ok(view)))
}

fn selection_from_query(query: ContentQuery) -> Result<ContentSelection, ApiError> {
    let class = query
        .class
        .as_deref()
        .map(FileClass::from_str)
        .transpose()
        .map_err(|e| AppError::validation(e))?;
    let sort = query
        .sort
        .as_deref()
        .map(DocumentSort::from_str)
        .transpose()
        .map_err(|e| AppError::validation(e))?;

    Ok(ContentSelection {
        folder: query.folder,
        document: query.document,
        query: query.q,
        class,
        sort,
    })
}
