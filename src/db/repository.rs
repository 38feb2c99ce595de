use async_trait::async_trait;

use crate::error::AppError;
use crate::models::content::{CandidateRecord, Category};

/// Repository trait for the content collections.
///
/// Every handler and the search engine receive it as an injected
/// `Arc<dyn ContentRepository>`, so tests can swap in the in-memory store or a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// List up to `limit` records of one category, sorted ascending by its display field.
    async fn list_by_category(
        &self,
        category: Category,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError>;

    /// Find a record by its id.
    async fn find_by_id(
        &self,
        category: Category,
        id: &str,
    ) -> Result<Option<CandidateRecord>, AppError>;

    /// Team members whose `name_lower` starts with the (already normalized) prefix,
    /// sorted by name.
    async fn find_team_members_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError>;

    /// Records of one category whose `tags` array contains `tag`, sorted by display field.
    ///
    /// Categories without tags yield an empty list.
    async fn list_by_tag(
        &self,
        category: Category,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError>;

    /// Insert a record or replace the existing one with the same id.
    async fn upsert(&self, record: CandidateRecord) -> Result<(), AppError>;
}

/// Exclusive upper bound of a prefix range scan on a string field.
///
/// The smallest string greater than every string starting with `prefix`:
/// the prefix with its last code point incremented. Code point order matches
/// the byte order MongoDB compares strings in. `None` when no bound exists
/// (empty prefix, or one made only of `char::MAX`).
pub fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = next_char(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

fn next_char(c: char) -> Option<char> {
    match c as u32 {
        // skip the surrogate range
        0xD7FF => Some('\u{E000}'),
        n => char::from_u32(n + 1),
    }
}

/// MongoDB implementation of the ContentRepository.
///
/// Each category lives in its own collection named after the category.
#[cfg(feature = "ssr")]
pub struct MongoContentRepository {
    db: mongodb::Database,
}

#[cfg(feature = "ssr")]
impl MongoContentRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { db: db.clone() }
    }

    async fn find_sorted<T>(
        &self,
        category: Category,
        filter: mongodb::bson::Document,
        limit: usize,
    ) -> Result<Vec<T>, AppError>
    where
        T: serde::de::DeserializeOwned + Unpin + Send + Sync,
    {
        use futures::TryStreamExt;
        use mongodb::options::FindOptions;

        let mut sort = mongodb::bson::Document::new();
        sort.insert(category.display_field(), 1);

        let options = FindOptions::builder()
            .sort(sort)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        let mut cursor = self
            .db
            .collection::<T>(category.as_str())
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(format!("{category}: {e}")))?;

        let mut items = Vec::new();
        while let Some(item) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(format!("{category}: {e}")))?
        {
            items.push(item);
        }

        Ok(items)
    }

    async fn find_records(
        &self,
        category: Category,
        filter: mongodb::bson::Document,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        use crate::models::content::{Pdf, Photo, Story, TeamMember, Video};

        let records = match category {
            Category::Blogs => self
                .find_sorted::<Story>(category, filter, limit)
                .await?
                .into_iter()
                .map(CandidateRecord::Blog)
                .collect(),
            Category::FeatureStories => self
                .find_sorted::<Story>(category, filter, limit)
                .await?
                .into_iter()
                .map(CandidateRecord::FeatureStory)
                .collect(),
            Category::Photos => self
                .find_sorted::<Photo>(category, filter, limit)
                .await?
                .into_iter()
                .map(CandidateRecord::Photo)
                .collect(),
            Category::Videos => self
                .find_sorted::<Video>(category, filter, limit)
                .await?
                .into_iter()
                .map(CandidateRecord::Video)
                .collect(),
            Category::Pdfs => self
                .find_sorted::<Pdf>(category, filter, limit)
                .await?
                .into_iter()
                .map(CandidateRecord::Pdf)
                .collect(),
            Category::TeamMembers => self
                .find_sorted::<TeamMember>(category, filter, limit)
                .await?
                .into_iter()
                .map(CandidateRecord::TeamMember)
                .collect(),
        };

        Ok(records)
    }

    async fn replace<T>(&self, category: Category, id: &str, item: &T) -> Result<(), AppError>
    where
        T: serde::Serialize + Send + Sync,
    {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();

        self.db
            .collection::<T>(category.as_str())
            .replace_one(doc! { "id": id }, item)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(format!("{category}: {e}")))?;

        Ok(())
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl ContentRepository for MongoContentRepository {
    async fn list_by_category(
        &self,
        category: Category,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        self.find_records(category, mongodb::bson::Document::new(), limit)
            .await
    }

    async fn find_by_id(
        &self,
        category: Category,
        id: &str,
    ) -> Result<Option<CandidateRecord>, AppError> {
        use mongodb::bson::doc;

        let mut records = self.find_records(category, doc! { "id": id }, 1).await?;
        Ok(records.pop())
    }

    async fn find_team_members_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        use mongodb::bson::doc;

        let mut range = doc! { "$gte": prefix };
        if let Some(upper) = prefix_upper_bound(prefix) {
            range.insert("$lt", upper);
        }
        let filter = doc! { "name_lower": range };

        self.find_records(Category::TeamMembers, filter, limit).await
    }

    async fn list_by_tag(
        &self,
        category: Category,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        use mongodb::bson::doc;

        if !category.supports_tags() {
            return Ok(Vec::new());
        }

        // Equality on an array field matches any element.
        self.find_records(category, doc! { "tags": tag }, limit).await
    }

    async fn upsert(&self, record: CandidateRecord) -> Result<(), AppError> {
        let category = record.category();
        match &record {
            CandidateRecord::Blog(story) | CandidateRecord::FeatureStory(story) => {
                self.replace(category, &story.id, story).await
            }
            CandidateRecord::Photo(photo) => self.replace(category, &photo.id, photo).await,
            CandidateRecord::Video(video) => self.replace(category, &video.id, video).await,
            CandidateRecord::Pdf(pdf) => self.replace(category, &pdf.id, pdf).await,
            CandidateRecord::TeamMember(member) => {
                self.replace(category, &member.id, member).await
            }
        }
    }
}
