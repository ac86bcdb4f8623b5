use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::repos::user_repo::{UserId, UserRow};

/// The identity handed to handlers after a successful authentication.
///
/// Built only from `UserRow` via `From`, which drops `password_hash`; there is
/// no field to put it back into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for AuthenticatedUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_principal_has_no_hash() {
        let now = Utc::now();
        let row = UserRow {
            id: 42,
            email: "u42@example.com".into(),
            password_hash: "$argon2id$v=19$abc".into(),
            first_name: None,
            last_name: Some("Lovelace".into()),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(AuthenticatedUser::from(row)).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["id"], 42);
        assert_eq!(obj["last_name"], "Lovelace");
        assert!(!obj.contains_key("password_hash"));
        assert!(!obj.contains_key("passwordHash"));
        assert!(!json.to_string().contains("argon2id"));
    }
}
