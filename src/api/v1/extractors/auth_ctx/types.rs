/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックや user lookup は middleware/services 側の責務
 */

use crate::repos::user_repo::UserId;
use crate::services::auth::AuthenticatedUser;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user` は password hash を含まない sanitize 済みのレコード
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user: AuthenticatedUser,
}

impl AuthCtx {
    pub fn new(user: AuthenticatedUser) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}
