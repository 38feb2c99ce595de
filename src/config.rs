use serde::Deserialize;

use crate::error::AppError;
use crate::search::SearchConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    /// Custom endpoint for MinIO / LocalStack.
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub session_ttl_hours: i64,
    /// Editor account created at startup when both fields are set.
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

/// Default cap on a media upload request body: 200 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Largest accepted `POST /api/v1/media` request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Server configuration.
///
/// Sources, later ones overriding earlier ones: built-in defaults, an optional
/// `mediahub.toml` in the working directory, and `MEDIAHUB__*` environment
/// variables (e.g. `MEDIAHUB__DATABASE__URI`, `MEDIAHUB__SEARCH__FAILURE_POLICY`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub media: MediaConfig,
    /// Run on in-memory stores seeded with sample content.
    #[serde(default)]
    pub demo_mode: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("mediahub").required(false))
                .add_source(
                    config::Environment::with_prefix("MEDIAHUB")
                        .prefix_separator("__")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .set_default("database.uri", "mongodb://localhost:27017")?
            .set_default("database.name", "mediahub")?
            .set_default("storage.bucket", "mediahub-media")?
            .set_default("search.limit_per_category", 50)?
            .set_default("search.failure_policy", "isolate")?
            .set_default("auth.session_ttl_hours", 24)?
            .set_default("media.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("demo_mode", false)?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
