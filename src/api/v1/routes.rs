/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 公開: /auth/signup, /auth/signin
 * - Bearer 必須: /users/me, /bookmarks (middleware::auth::access::apply で一括適用)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{signin, signup},
    bookmarks::{create_bookmark, delete_bookmark, get_bookmark, list_bookmarks, update_bookmark},
    users::me,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin));

    let protected = Router::new()
        .route("/users/me", get(me))
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{bookmark_id}",
            get(get_bookmark)
                .patch(update_bookmark)
                .delete(delete_bookmark),
        );

    public.merge(middleware::auth::access::apply(protected, state))
}
