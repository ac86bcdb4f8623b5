/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer token 検証, http: request id / trace / limits
 */
pub mod auth;
pub mod http;
