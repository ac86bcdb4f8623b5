/*
 * Responsibility
 * - bookmarks CRUD
 * - すべてのクエリは "userId" で絞り込む (他人の bookmark は見えない = 存在しない扱い)
 * - "userId" の FK は CASCADE なし。users 削除前に bookmarks を消す前提
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoResult;
use crate::repos::user_repo::UserId;

pub type BookmarkId = i64;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookmarkRow {
    pub id: BookmarkId,
    pub title: String,
    pub description: Option<String>,
    pub link: String,

    #[sqlx(rename = "userId")]
    pub user_id: UserId,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list_for_user(pool: &PgPool, user_id: UserId) -> RepoResult<Vec<BookmarkRow>> {
    let rows = sqlx::query_as::<_, BookmarkRow>(
        r#"
        SELECT
            id, title, description, link, "userId", "createdAt", "updatedAt"
        FROM bookmarks
        WHERE "userId" = $1
        ORDER BY id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create(
    pool: &PgPool,
    user_id: UserId,
    title: &str,
    description: Option<&str>,
    link: &str,
) -> RepoResult<BookmarkRow> {
    let row = sqlx::query_as::<_, BookmarkRow>(
        r#"
        INSERT INTO bookmarks (title, description, link, "userId")
        VALUES ($1, $2, $3, $4)
        RETURNING
            id, title, description, link, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(link)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_for_user(
    pool: &PgPool,
    user_id: UserId,
    bookmark_id: BookmarkId,
) -> RepoResult<Option<BookmarkRow>> {
    let row = sqlx::query_as::<_, BookmarkRow>(
        r#"
        SELECT
            id, title, description, link, "userId", "createdAt", "updatedAt"
        FROM bookmarks
        WHERE id = $1 AND "userId" = $2
        "#,
    )
    .bind(bookmark_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_for_user(
    pool: &PgPool,
    user_id: UserId,
    bookmark_id: BookmarkId,
    title: Option<&str>,
    description: Option<&str>,
    link: Option<&str>,
) -> RepoResult<Option<BookmarkRow>> {
    let row = sqlx::query_as::<_, BookmarkRow>(
        r#"
        UPDATE bookmarks
        SET
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            link = COALESCE($5, link),
            "updatedAt" = now()
        WHERE id = $1 AND "userId" = $2
        RETURNING
            id, title, description, link, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(bookmark_id)
    .bind(user_id)
    .bind(title)
    .bind(description)
    .bind(link)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_for_user(
    pool: &PgPool,
    user_id: UserId,
    bookmark_id: BookmarkId,
) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookmarks
        WHERE id = $1 AND "userId" = $2
        "#,
    )
    .bind(bookmark_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
