/*
 * Responsibility
 * - axum::Json の代わりに handler が受け取る JSON body extractor
 * - JsonRejection (content-type 不一致 / 構文エラー / 型不一致) を
 *   AppError::bad_request("INVALID_REQUEST") へ揃え、JSON error body で返す
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::debug!(status = %rejection.status(), "rejected request body");
                AppError::bad_request("INVALID_REQUEST", rejection.body_text())
            })?;

        Ok(Self(value))
    }
}
