/*
 * Responsibility
 * - Bookmarks の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::bookmark_repo::BookmarkRow;

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

impl CreateBookmarkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.link.trim().is_empty() {
            return Err("link is required");
        }
        if self.link.len() > 2048 {
            return Err("link must be <= 2048 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookmarkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl UpdateBookmarkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(link) = &self.link
            && (link.trim().is_empty() || link.len() > 2048)
        {
            return Err("link must be 1..=2048 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookmarkRow> for BookmarkResponse {
    fn from(row: BookmarkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            link: row.link,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_link() {
        let ok = CreateBookmarkRequest {
            title: "Rust".into(),
            description: None,
            link: "https://www.rust-lang.org".into(),
        };
        assert!(ok.validate().is_ok());

        let no_link = CreateBookmarkRequest {
            link: " ".into(),
            ..ok
        };
        assert_eq!(no_link.validate(), Err("link is required"));
    }

    #[test]
    fn update_rejects_blank_fields_but_allows_omission() {
        let empty = UpdateBookmarkRequest {
            title: None,
            description: None,
            link: None,
        };
        assert!(empty.validate().is_ok());

        let blank_title = UpdateBookmarkRequest {
            title: Some("".into()),
            description: None,
            link: None,
        };
        assert_eq!(blank_title.validate(), Err("title cannot be empty"));
    }
}
