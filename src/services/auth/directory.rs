use std::{future::Future, pin::Pin};

use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserId, UserRepo, UserRow};

/// User lookup used by `AuthService` to resolve a verified token subject.
///
/// - `Ok(Some(_))`: the subject exists
/// - `Ok(None)`: no such user (deleted or never existed)
/// - `Err(_)`: store failure; callers must not treat it as "no such user"
pub trait UserDirectory: Send + Sync {
    fn find_by_id<'a>(
        &'a self,
        id: UserId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<UserRow>, RepoError>> + Send + 'a>>;
}

impl UserDirectory for UserRepo {
    fn find_by_id<'a>(
        &'a self,
        id: UserId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<UserRow>, RepoError>> + Send + 'a>> {
        Box::pin(UserRepo::find_by_id(self, id))
    }
}
