/*
 * Responsibility
 * - GET /users/me
 * - AuthCtx の sanitize 済み user をそのまま返す (DB へは再問い合わせしない)
 */
use axum::Json;

use crate::api::v1::extractors::AuthCtxExtractor;
use crate::services::auth::AuthenticatedUser;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<AuthenticatedUser> {
    Json(ctx.user)
}
