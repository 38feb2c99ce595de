use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Contact details shown in the site footer and on the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// A home page banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Site-wide settings stored in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Settings document key (always "global").
    pub key: String,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub banners: Vec<Banner>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            key: "global".to_string(),
            contact: ContactInfo::default(),
            banners: Vec::new(),
        }
    }
}

/// Repository trait for site settings.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Get the global site settings.
    async fn get_settings(&self) -> Result<SiteSettings, AppError>;

    /// Replace contact info and banners.
    async fn save_settings(&self, contact: ContactInfo, banners: Vec<Banner>)
        -> Result<(), AppError>;
}

/// MongoDB implementation of the SettingsRepository.
#[cfg(feature = "ssr")]
pub struct MongoSettingsRepository {
    collection: mongodb::Collection<SiteSettings>,
}

#[cfg(feature = "ssr")]
impl MongoSettingsRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("settings"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl SettingsRepository for MongoSettingsRepository {
    async fn get_settings(&self) -> Result<SiteSettings, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .find_one(doc! { "key": "global" })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.unwrap_or_default())
    }

    async fn save_settings(
        &self,
        contact: ContactInfo,
        banners: Vec<Banner>,
    ) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let settings = SiteSettings {
            key: "global".to_string(),
            contact,
            banners,
        };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "key": "global" }, &settings)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SiteSettings::default();
        assert_eq!(settings.key, "global");
        assert!(settings.banners.is_empty());
        assert!(settings.contact.email.is_empty());
    }

    #[test]
    fn test_settings_missing_fields_default() {
        let settings: SiteSettings = serde_json::from_str(r#"{"key": "global"}"#).unwrap();
        assert_eq!(settings, SiteSettings::default());
    }
}
