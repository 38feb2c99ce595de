use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use serde::Serialize;

use crate::error::AppError;
use crate::rendering::media::{MEDIA_KEY_PREFIX, MEDIA_ROUTE_PREFIX};
use crate::storage::client::StorageClient;

/// Response from a successful media upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Storage key, suitable for `image_url`, `video_url` or `file_url`.
    pub key: String,
    /// Path where the file is served.
    pub url: String,
}

// No SVG: it can carry script.
fn is_allowed_content_type(content_type: &str) -> bool {
    (content_type.starts_with("image/") && !content_type.starts_with("image/svg"))
        || content_type.starts_with("video/")
        || content_type == "application/pdf"
}

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("{context}: {}", err.body_text()))
    }
}

fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Store an uploaded file under a unique key.
pub async fn process_upload(
    storage: &dyn StorageClient,
    file_name: &str,
    content_type: &str,
    data: Vec<u8>,
) -> Result<UploadResponse, AppError> {
    if !is_allowed_content_type(content_type) {
        return Err(AppError::BadRequest(
            "Only raster image, video and PDF files are allowed".into(),
        ));
    }
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let timestamp = chrono::Utc::now().timestamp_millis();
    let file_name = format!("{}_{}", timestamp, sanitize_file_name(file_name));
    let key = format!("{MEDIA_KEY_PREFIX}{file_name}");

    storage.put_object(&key, data).await?;
    tracing::info!(key = %key, content_type, "media uploaded");

    Ok(UploadResponse {
        url: format!("{MEDIA_ROUTE_PREFIX}{file_name}"),
        key,
    })
}

/// Content type for a served file, from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Axum handler for `POST /api/v1/media`.
///
/// Editor only. Accepts a multipart form with a single file field named "file".
pub async fn upload_media_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    mut multipart: Multipart,
) -> Result<axum::Json<UploadResponse>, AppError> {
    crate::auth::session::require_user(state.auth_repo.as_ref(), &jar).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Multipart error", e))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file", e))?;

        let response = process_upload(
            state.storage_client.as_ref(),
            &file_name,
            &content_type,
            data.to_vec(),
        )
        .await?;
        return Ok(axum::Json(response));
    }

    Err(AppError::BadRequest("No file field found in request".into()))
}

/// Axum handler for `GET /api/v1/media/{filename}`.
pub async fn serve_media_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(filename): axum::extract::Path<String>,
) -> Result<axum::response::Response, AppError> {
    use axum::response::IntoResponse;

    let key = format!("{MEDIA_KEY_PREFIX}{filename}");
    let data = state
        .storage_client
        .get_object(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("Media not found".into()))?;

    Ok((
        [
            (axum::http::header::CONTENT_TYPE, content_type_for(&filename)),
            (axum::http::header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        data,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::client::InMemoryStorageClient;

    #[tokio::test]
    async fn test_upload_stores_under_media_prefix() {
        let storage = InMemoryStorageClient::new();
        let response = process_upload(&storage, "my photo.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();

        assert!(response.key.starts_with("media/"));
        assert!(response.key.ends_with("_my_photo.png"));
        assert!(response.url.starts_with("/api/v1/media/"));
        assert_eq!(
            storage.get_object(&response.key).await.unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[tokio::test]
    async fn test_upload_accepts_video_and_pdf() {
        let storage = InMemoryStorageClient::new();
        assert!(process_upload(&storage, "a.mp4", "video/mp4", vec![0]).await.is_ok());
        assert!(process_upload(&storage, "a.pdf", "application/pdf", vec![0]).await.is_ok());
    }

    #[tokio::test]
    async fn test_upload_rejects_other_types() {
        let storage = InMemoryStorageClient::new();
        let result = process_upload(&storage, "a.txt", "text/plain", vec![0]).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_upload_rejects_svg() {
        let storage = InMemoryStorageClient::new();
        let svg = b"<svg onload=\"alert(1)\"/>".to_vec();
        let result = process_upload(&storage, "logo.svg", "image/svg+xml", svg).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_file() {
        let storage = InMemoryStorageClient::new();
        let result = process_upload(&storage, "a.png", "image/png", Vec::new()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("x.PNG"), "image/png");
        assert_eq!(content_type_for("clip.webm"), "video/webm");
        assert_eq!(content_type_for("report.pdf"), "application/pdf");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
        assert_eq!(content_type_for("logo.svg"), "application/octet-stream");
    }
}
