use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use super::{content, media, search, site};
use crate::auth::session;
use crate::config::MediaConfig;
use crate::state::AppState;

/// JSON API and auth routes. The Leptos pages are mounted separately.
///
/// Media uploads get their own body limit; every other route keeps axum's default.
pub fn router(media_config: &MediaConfig) -> Router<AppState> {
    Router::new()
        .route("/api/v1/search", get(search::search_handler))
        .route("/api/v1/content", post(content::upsert_handler))
        .route("/api/v1/content/{category}", get(content::list_handler))
        .route("/api/v1/content/{category}/{id}", get(content::get_handler))
        .route("/api/v1/team", get(content::team_directory_handler))
        .route("/api/v1/tags/{tag}", get(content::tag_handler))
        .route(
            "/api/v1/media",
            post(media::upload_media_handler)
                .layer(DefaultBodyLimit::max(media_config.max_upload_bytes)),
        )
        .route("/api/v1/media/{filename}", get(media::serve_media_handler))
        .route(
            "/api/v1/site",
            get(site::get_site_handler).put(site::update_site_handler),
        )
        .route("/api/auth/login", post(session::login_handler))
        .route("/api/auth/me", get(session::me_handler))
        .route("/api/auth/logout", post(session::logout_handler))
}
