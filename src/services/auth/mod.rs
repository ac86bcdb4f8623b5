pub mod access_jwt;
pub mod directory;
pub mod factory;
pub mod jwt;
pub mod password;
pub mod principal;

pub use access_jwt::{AuthError, AuthService};
pub use directory::UserDirectory;
pub use factory::{build_auth_service, build_token_issuer};
pub use jwt::TokenIssuer;
pub use principal::AuthenticatedUser;
