use chrono::Utc;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::db::repository::ContentRepository;
use crate::error::AppError;
use crate::models::content::{CandidateRecord, Category, CategoryFilter};
use crate::search::normalize::normalize;

/// Cap on list, directory and tag views.
pub const LIST_LIMIT: usize = 50;

/// The response from a successful create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertResponse {
    pub message: String,
    pub category: Category,
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TeamDirectoryParams {
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TagParams {
    #[serde(default, rename = "type")]
    pub category: Option<String>,
}

fn parse_category(raw: &str) -> Result<Category, AppError> {
    Category::parse(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown content type '{raw}'")))
}

/// Create or update a record.
///
/// Assigns an id to new records, keeps the original creation time of edited
/// stories, and derives the normalized name used by the team directory.
pub async fn process_upsert(
    repo: &dyn ContentRepository,
    mut record: CandidateRecord,
) -> Result<UpsertResponse, AppError> {
    let category = record.category();

    if record.display_value().trim().is_empty() {
        return Err(AppError::BadRequest(format!(
            "Field '{}' cannot be empty",
            category.display_field()
        )));
    }

    let existing = if record.id().trim().is_empty() {
        *record.id_mut() = uuid::Uuid::new_v4().to_string();
        None
    } else {
        repo.find_by_id(category, record.id()).await?
    };

    match &mut record {
        CandidateRecord::Blog(story) | CandidateRecord::FeatureStory(story) => {
            if story.created_at.is_none() {
                story.created_at = match &existing {
                    Some(CandidateRecord::Blog(old)) | Some(CandidateRecord::FeatureStory(old)) => {
                        old.created_at
                    }
                    _ => None,
                }
                .or_else(|| Some(Utc::now()));
            }
        }
        CandidateRecord::TeamMember(member) => member.name_lower = normalize(&member.name),
        CandidateRecord::Photo(_) | CandidateRecord::Video(_) | CandidateRecord::Pdf(_) => {}
    }

    let id = record.id().to_string();
    repo.upsert(record).await?;

    tracing::info!(%category, %id, created = existing.is_none(), "content saved");

    Ok(UpsertResponse {
        message: "Content saved successfully".to_string(),
        category,
        id,
    })
}

/// Point lookup backing the detail views.
pub async fn process_get(
    repo: &dyn ContentRepository,
    category: &str,
    id: &str,
) -> Result<CandidateRecord, AppError> {
    let category = parse_category(category)?;
    repo.find_by_id(category, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No {category} record with id '{id}'")))
}

/// List view of one category, sorted by display field.
pub async fn process_list(
    repo: &dyn ContentRepository,
    category: &str,
) -> Result<Vec<CandidateRecord>, AppError> {
    repo.list_by_category(parse_category(category)?, LIST_LIMIT).await
}

/// Team directory: members whose name starts with the prefix, or everyone for a blank prefix.
pub async fn process_team_directory(
    repo: &dyn ContentRepository,
    prefix: Option<&str>,
) -> Result<Vec<CandidateRecord>, AppError> {
    let prefix = normalize(prefix.unwrap_or_default());
    if prefix.is_empty() {
        repo.list_by_category(Category::TeamMembers, LIST_LIMIT).await
    } else {
        repo.find_team_members_by_name_prefix(&prefix, LIST_LIMIT)
            .await
    }
}

/// Records tagged with `tag` across the tag-bearing categories in scope.
pub async fn process_tag_browse(
    repo: &dyn ContentRepository,
    tag: &str,
    scope: CategoryFilter,
) -> Result<Vec<CandidateRecord>, AppError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(AppError::BadRequest("Tag cannot be empty".into()));
    }

    let per_category = try_join_all(
        scope
            .categories()
            .into_iter()
            .filter(Category::supports_tags)
            .map(|category| repo.list_by_tag(category, tag, LIST_LIMIT)),
    )
    .await?;

    Ok(per_category.into_iter().flatten().collect())
}

/// Axum handler for `POST /api/v1/content`. Requires a session.
pub async fn upsert_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    axum::Json(record): axum::Json<CandidateRecord>,
) -> Result<axum::Json<UpsertResponse>, AppError> {
    crate::auth::session::require_user(state.auth_repo.as_ref(), &jar).await?;
    let response = process_upsert(state.content_repo.as_ref(), record).await?;
    Ok(axum::Json(response))
}

/// Axum handler for `GET /api/v1/content/{category}`.
pub async fn list_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(category): axum::extract::Path<String>,
) -> Result<axum::Json<Vec<CandidateRecord>>, AppError> {
    let records = process_list(state.content_repo.as_ref(), &category).await?;
    Ok(axum::Json(records))
}

/// Axum handler for `GET /api/v1/content/{category}/{id}`.
pub async fn get_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path((category, id)): axum::extract::Path<(String, String)>,
) -> Result<axum::Json<CandidateRecord>, AppError> {
    let record = process_get(state.content_repo.as_ref(), &category, &id).await?;
    Ok(axum::Json(record))
}

/// Axum handler for `GET /api/v1/team?prefix=...`.
pub async fn team_directory_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Query(params): axum::extract::Query<TeamDirectoryParams>,
) -> Result<axum::Json<Vec<CandidateRecord>>, AppError> {
    let members =
        process_team_directory(state.content_repo.as_ref(), params.prefix.as_deref()).await?;
    Ok(axum::Json(members))
}

/// Axum handler for `GET /api/v1/tags/{tag}?type=...`.
pub async fn tag_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(tag): axum::extract::Path<String>,
    axum::extract::Query(params): axum::extract::Query<TagParams>,
) -> Result<axum::Json<Vec<CandidateRecord>>, AppError> {
    let scope = CategoryFilter::parse(params.category.as_deref())?;
    let records = process_tag_browse(state.content_repo.as_ref(), &tag, scope).await?;
    Ok(axum::Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryContentRepository;
    use crate::models::content::{Photo, SocialLinks, Story, TeamMember};

    fn story(id: &str, title: &str, tags: &[&str]) -> Story {
        Story {
            id: id.to_string(),
            title: title.to_string(),
            author: "Staff".to_string(),
            content: "Body".to_string(),
            image_url: None,
            video_url: None,
            video_embedded: false,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: None,
        }
    }

    fn member(name: &str) -> TeamMember {
        TeamMember {
            id: String::new(),
            name: name.to_string(),
            name_lower: String::new(),
            role: "Editor".to_string(),
            bio: String::new(),
            image_url: None,
            socials: SocialLinks::default(),
        }
    }

    #[tokio::test]
    async fn test_upsert_assigns_id_and_created_at() {
        let repo = InMemoryContentRepository::new();
        let response = process_upsert(&repo, CandidateRecord::Blog(story("", "Hello", &[])))
            .await
            .unwrap();

        assert_eq!(response.category, Category::Blogs);
        assert!(!response.id.is_empty());

        match repo.find_by_id(Category::Blogs, &response.id).await.unwrap() {
            Some(CandidateRecord::Blog(saved)) => assert!(saved.created_at.is_some()),
            other => panic!("Expected saved blog, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_original_created_at() {
        let repo = InMemoryContentRepository::new();
        let first = process_upsert(&repo, CandidateRecord::Blog(story("", "Hello", &[])))
            .await
            .unwrap();
        let created = match repo.find_by_id(Category::Blogs, &first.id).await.unwrap() {
            Some(CandidateRecord::Blog(saved)) => saved.created_at,
            other => panic!("Expected saved blog, got: {:?}", other),
        };

        process_upsert(&repo, CandidateRecord::Blog(story(&first.id, "Hello again", &[])))
            .await
            .unwrap();

        let records = repo.list_by_category(Category::Blogs, 50).await.unwrap();
        assert_eq!(records.len(), 1);
        match &records[0] {
            CandidateRecord::Blog(saved) => {
                assert_eq!(saved.title, "Hello again");
                assert_eq!(saved.created_at, created);
            }
            other => panic!("Expected blog, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upsert_rejects_blank_display_field() {
        let repo = InMemoryContentRepository::new();
        let result = process_upsert(&repo, CandidateRecord::TeamMember(member("  "))).await;
        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("'name'")),
            other => panic!("Expected BadRequest, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upsert_derives_name_lower_for_directory() {
        let repo = InMemoryContentRepository::new();
        process_upsert(&repo, CandidateRecord::TeamMember(member("Imaan  KHAN")))
            .await
            .unwrap();
        process_upsert(&repo, CandidateRecord::TeamMember(member("Sara Malik")))
            .await
            .unwrap();

        let found = process_team_directory(&repo, Some(" IMA ")).await.unwrap();
        assert_eq!(found.len(), 1);
        match &found[0] {
            CandidateRecord::TeamMember(m) => assert_eq!(m.name_lower, "imaan khan"),
            other => panic!("Expected team member, got: {:?}", other),
        }

        let everyone = process_team_directory(&repo, None).await.unwrap();
        assert_eq!(everyone.len(), 2);
    }

    #[tokio::test]
    async fn test_get_unknown_record_is_not_found() {
        let repo = InMemoryContentRepository::new();
        assert!(matches!(
            process_get(&repo, "blogs", "missing").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            process_get(&repo, "podcasts", "x").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_tag_browse_across_categories() {
        let repo = InMemoryContentRepository::with_records(vec![
            CandidateRecord::Blog(story("b1", "Harvest Notes", &["harvest"])),
            CandidateRecord::FeatureStory(story("f1", "Farm Life", &["harvest", "farm"])),
            CandidateRecord::Blog(story("b2", "City Life", &["city"])),
            CandidateRecord::Photo(Photo {
                id: "p1".to_string(),
                title: "Fields".to_string(),
                image_url: "media/fields.jpg".to_string(),
                caption: None,
                tags: vec!["harvest".to_string()],
            }),
        ]);

        let all = process_tag_browse(&repo, "harvest", CategoryFilter::All)
            .await
            .unwrap();
        let ids: Vec<&str> = all.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b1", "f1", "p1"]);

        let blogs = process_tag_browse(&repo, "harvest", CategoryFilter::Only(Category::Blogs))
            .await
            .unwrap();
        assert_eq!(blogs.len(), 1);

        let pdfs = process_tag_browse(&repo, "harvest", CategoryFilter::Only(Category::Pdfs))
            .await
            .unwrap();
        assert!(pdfs.is_empty());

        assert!(matches!(
            process_tag_browse(&repo, " ", CategoryFilter::All).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
