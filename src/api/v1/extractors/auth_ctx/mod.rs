/*!
 * Authenticated principal for handlers
 *
 * Responsibility:
 * - access middleware が解決した sanitize 済み user (password hash なし) を
 *   AuthCtx として handler に渡す
 * - extensions に AuthCtx が無ければ 401 (middleware 未適用の route)
 *
 * Layout:
 * - core: FromRequestParts 実装 (AuthCtxExtractor)
 * - types: AuthCtx 本体
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
