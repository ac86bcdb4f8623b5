/*
 * Responsibility
 * - /bookmarks 系 CRUD handler
 * - すべて AuthCtx の user_id で絞り込む。他人の bookmark は 404
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::bookmarks::{BookmarkResponse, CreateBookmarkRequest, UpdateBookmarkRequest},
        extractors::{AuthCtxExtractor, BookmarkPathId, JsonBody},
    },
    error::AppError,
    repos::bookmark_repo,
    state::AppState,
};

pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<Vec<BookmarkResponse>>, AppError> {
    let rows = bookmark_repo::list_for_user(state.db.pool(), ctx.user_id()).await?;

    Ok(Json(rows.into_iter().map(BookmarkResponse::from).collect()))
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<BookmarkResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let row = bookmark_repo::create(
        state.db.pool(),
        ctx.user_id(),
        req.title.trim(),
        req.description.as_deref(),
        req.link.trim(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_bookmark(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    bookmark_id: BookmarkPathId,
) -> Result<Json<BookmarkResponse>, AppError> {
    let row = bookmark_repo::get_for_user(state.db.pool(), ctx.user_id(), bookmark_id.id)
        .await?
        .ok_or(AppError::not_found("bookmark"))?;

    Ok(Json(row.into()))
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    bookmark_id: BookmarkPathId,
    JsonBody(req): JsonBody<UpdateBookmarkRequest>,
) -> Result<Json<BookmarkResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let row = bookmark_repo::update_for_user(
        state.db.pool(),
        ctx.user_id(),
        bookmark_id.id,
        req.title.as_deref().map(str::trim),
        req.description.as_deref(),
        req.link.as_deref().map(str::trim),
    )
    .await?
    .ok_or(AppError::not_found("bookmark"))?;

    Ok(Json(row.into()))
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    bookmark_id: BookmarkPathId,
) -> Result<StatusCode, AppError> {
    let deleted =
        bookmark_repo::delete_for_user(state.db.pool(), ctx.user_id(), bookmark_id.id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("bookmark"))
    }
}
