use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::error;

use crate::error::AppError;
use crate::repos::user_repo::UserId;

#[derive(Debug, Serialize)]
struct AccessTokenClaims<'a> {
    // Registered claim: StringOrURI, so the numeric id is sent as text.
    sub: String,
    email: &'a str,
    iat: i64,
    exp: i64,
}

/// HS256 access-token signer sharing its secret with `AuthService`.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenIssuer")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue_access_token(&self, user_id: UserId, email: &str) -> Result<String, AppError> {
        self.issue_access_token_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`. `exp = now + ttl`.
    pub fn issue_access_token_at(
        &self,
        user_id: UserId,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let iat = now.timestamp();
        let exp = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or_else(|| {
                error!(ttl_seconds = self.ttl_seconds, "access token ttl out of range");
                AppError::Internal
            })?;
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            email,
            iat,
            exp,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}
