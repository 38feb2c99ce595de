use serde::Deserialize;

use crate::db::settings_repository::{Banner, ContactInfo, SettingsRepository, SiteSettings};
use crate::error::AppError;

/// Body of `PUT /api/v1/site`.
#[derive(Debug, Deserialize)]
pub struct UpdateSiteRequest {
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub banners: Vec<Banner>,
}

/// Validate and store new site settings.
pub async fn process_update_site(
    repo: &dyn SettingsRepository,
    request: UpdateSiteRequest,
) -> Result<SiteSettings, AppError> {
    for (index, banner) in request.banners.iter().enumerate() {
        if banner.title.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "Banner {index} must have a title"
            )));
        }
        if banner.image_url.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "Banner {index} must have an image"
            )));
        }
    }

    repo.save_settings(request.contact, request.banners).await?;
    tracing::info!("site settings updated");
    repo.get_settings().await
}

/// Axum handler for `GET /api/v1/site`.
pub async fn get_site_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
) -> Result<axum::Json<SiteSettings>, AppError> {
    let settings = state.settings_repo.get_settings().await?;
    Ok(axum::Json(settings))
}

/// Axum handler for `PUT /api/v1/site`. Editor only.
pub async fn update_site_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    axum::Json(request): axum::Json<UpdateSiteRequest>,
) -> Result<axum::Json<SiteSettings>, AppError> {
    crate::auth::session::require_user(state.auth_repo.as_ref(), &jar).await?;
    let settings = process_update_site(state.settings_repo.as_ref(), request).await?;
    Ok(axum::Json(settings))
}
