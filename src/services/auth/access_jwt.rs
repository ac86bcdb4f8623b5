use std::{error::Error as StdError, fmt, sync::Arc};

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::repos::user_repo::UserId;
use crate::services::auth::directory::UserDirectory;
use crate::services::auth::principal::AuthenticatedUser;

// Why a token was rejected. Logged, never sent to the client.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    UnknownSubject(UserId),
    Directory(RepoError),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::UnknownSubject(id) => write!(f, "token subject {} does not exist", id),
            Self::Directory(e) => write!(f, "user lookup failed: {}", e),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            Self::Directory(e) => Some(e),
            Self::UnknownSubject(_) => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// What callers of `AuthService::authenticate` get to see.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("store unavailable")]
    StoreUnavailable(#[source] RepoError),
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `sub` is the numeric user id. We issue it as a string, but accept a JSON
///   number too since older tokens carried it that way.
/// - `exp` is checked by jsonwebtoken before this struct is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(deserialize_with = "deserialize_subject")]
    pub sub: UserId,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

fn deserialize_subject<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSubject {
        Number(i64),
        Text(String),
    }

    match RawSubject::deserialize(deserializer)? {
        RawSubject::Number(id) => Ok(id),
        RawSubject::Text(s) => s
            .trim()
            .parse::<UserId>()
            .map_err(|_| de::Error::custom("'sub' is not a user id")),
    }
}

/// HS256 access-token verifier + subject resolution.
///
/// - Key material is intentionally not printable via Debug.
/// - Holds no mutable state; one instance serves every request.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
    directory: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64, directory: Arc<dyn UserDirectory>) -> Self {
        // Pinned to HS256: a token claiming any other alg is rejected.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            directory,
        }
    }

    /// Verify signature + expiry and decode the claims.
    ///
    /// `jsonwebtoken::Validation` checks:
    /// - signature against the configured secret
    /// - `exp` (with `leeway`)
    /// - algorithm is HS256
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AccessJwtError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify the token, then look its subject up in the directory.
    pub async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AccessJwtError> {
        let claims = self.verify(token)?;

        let row = self
            .directory
            .find_by_id(claims.sub)
            .await
            .map_err(AccessJwtError::Directory)?
            .ok_or(AccessJwtError::UnknownSubject(claims.sub))?;

        Ok(AuthenticatedUser::from(row))
    }

    /// This is the recommended entry-point for middleware/handlers.
    ///
    /// Every token or identity failure collapses into `Unauthenticated`; only a
    /// store failure during the lookup is reported separately.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        match self.resolve(token).await {
            Ok(user) => Ok(user),
            Err(AccessJwtError::Directory(err)) => {
                tracing::error!(error = %err, "user lookup failed during authentication");
                Err(AuthError::StoreUnavailable(err))
            }
            Err(err) => {
                tracing::warn!(error = %err, "access token rejected");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;
    use crate::services::auth::directory::memory::InMemoryUserDirectory;
    use crate::services::auth::jwt::TokenIssuer;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    fn service_with(directory: Arc<InMemoryUserDirectory>) -> AuthService {
        AuthService::new(SECRET, 0, directory)
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, 3600)
    }

    #[tokio::test]
    async fn valid_token_for_existing_user_authenticates() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);

        let token = issuer().issue_access_token(42, "u42@example.com").unwrap();
        let user = auth.authenticate(&token).await.unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.email, "u42@example.com");
        assert_eq!(user.first_name.as_deref(), Some("Test"));
    }

    #[tokio::test]
    async fn verifying_twice_yields_the_same_principal() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);
        let token = issuer().issue_access_token(42, "u42@example.com").unwrap();

        let first = auth.authenticate(&token).await.unwrap();
        let second = auth.authenticate(&token).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn expired_token_is_unauthenticated() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);

        // exp = now - 10
        let issued_at = Utc::now() - Duration::seconds(3610);
        let token = issuer()
            .issue_access_token_at(42, "u42@example.com", issued_at)
            .unwrap();

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));

        match auth.verify(&token) {
            Err(AccessJwtError::Jwt(e)) => assert!(matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            )),
            other => panic!("expected expired signature, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn leeway_tolerates_small_clock_skew() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = AuthService::new(SECRET, 60, directory);

        let issued_at = Utc::now() - Duration::seconds(3610);
        let token = issuer()
            .issue_access_token_at(42, "u42@example.com", issued_at)
            .unwrap();

        assert!(auth.authenticate(&token).await.is_ok());
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_unauthenticated() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);

        let token = TokenIssuer::new(b"some-other-secret", 3600)
            .issue_access_token(42, "u42@example.com")
            .unwrap();

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));

        match auth.verify(&token) {
            Err(AccessJwtError::Jwt(e)) => assert!(matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::InvalidSignature
            )),
            other => panic!("expected invalid signature, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_subject_is_unauthenticated() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);

        let token = issuer().issue_access_token(999, "ghost@example.com").unwrap();

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
        assert!(matches!(
            auth.resolve(&token).await,
            Err(AccessJwtError::UnknownSubject(999))
        ));
    }

    #[tokio::test]
    async fn deleted_user_with_live_token_is_unauthenticated() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory.clone());
        let token = issuer().issue_access_token(42, "u42@example.com").unwrap();

        assert!(auth.authenticate(&token).await.is_ok());

        directory.remove(42);
        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn malformed_token_is_unauthenticated() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);

        for token in ["", "not-a-jwt", "a.b.c"] {
            let err = auth.authenticate(token).await.unwrap_err();
            assert!(matches!(err, AuthError::Unauthenticated), "token {token:?}");
        }
    }

    #[tokio::test]
    async fn non_numeric_subject_is_unauthenticated() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);

        let now = Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "alice", "email": "a@example.com", "iat": now, "exp": now + 60 }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn numeric_subject_is_accepted() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        let auth = service_with(directory);

        let now = Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": 42, "email": "u42@example.com", "iat": now, "exp": now + 3600 }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp, now + 3600);
    }

    #[tokio::test]
    async fn store_failure_is_not_reported_as_bad_credentials() {
        let directory = Arc::new(InMemoryUserDirectory::with_user(42, "u42@example.com"));
        directory.fail_lookups();
        let auth = service_with(directory);

        let token = issuer().issue_access_token(42, "u42@example.com").unwrap();

        let err = auth.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }

    #[test]
    fn debug_hides_key_material() {
        let directory = Arc::new(InMemoryUserDirectory::default());
        let printed = format!("{:?}", service_with(directory));
        assert!(printed.starts_with("AuthService"));
        assert!(!printed.contains("test_secret_key"));
    }
}
