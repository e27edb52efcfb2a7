use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::health::healthz;
use crate::presentation::http::handlers::posts::{
    list_posts, post_comment, post_detail, share_form, share_post,
};

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(blog_router())
        .with_state(state)
}

fn blog_router() -> Router<AppState> {
    Router::new()
        .route("/blog/", get(list_posts))
        .route("/blog/{year}/{month}/{day}/{slug}/", get(post_detail))
        .route("/blog/post/{id}/share/", get(share_form).post(share_post))
        // Only submissions are accepted; other methods get 405 from the router.
        .route("/blog/post/{id}/comment/", post(post_comment))
}
