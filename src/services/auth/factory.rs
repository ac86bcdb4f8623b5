/// Factory: build the auth services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, TokenIssuer, UserDirectory};

pub fn build_auth_service(config: &Config, directory: Arc<dyn UserDirectory>) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        config.jwt_secret.as_bytes(),
        config.jwt_leeway_seconds,
        directory,
    ))
}

pub fn build_token_issuer(config: &Config) -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(
        config.jwt_secret.as_bytes(),
        config.access_token_ttl_seconds,
    ))
}
