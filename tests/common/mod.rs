#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use mediahub::api::content::process_upsert;
use mediahub::auth::models::User;
use mediahub::config::MediaConfig;
use mediahub::db::memory::InMemoryContentRepository;
use mediahub::db::repository::ContentRepository;
use mediahub::error::AppError;
use mediahub::models::content::{
    CandidateRecord, Category, Pdf, Photo, SocialLinks, Story, TeamMember, Video,
};
use mediahub::search::normalize::normalize;
use mediahub::search::SearchConfig;
use mediahub::state::AppState;

pub const EDITOR_EMAIL: &str = "editor@example.com";
pub const EDITOR_PASSWORD: &str = "correct horse battery staple";

/// API router wired to in-memory stores.
pub struct TestEnv {
    pub state: AppState,
    pub router: Router,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_content_repo(
            Arc::new(InMemoryContentRepository::new()),
            SearchConfig::default(),
        )
    }

    /// Build an environment around a custom content store (e.g. one that fails).
    pub fn with_content_repo(
        content_repo: Arc<dyn ContentRepository>,
        search_config: SearchConfig,
    ) -> Self {
        Self::build(content_repo, search_config, MediaConfig::default())
    }

    /// Build an environment with a custom media upload limit.
    pub fn with_media_config(media_config: MediaConfig) -> Self {
        Self::build(
            Arc::new(InMemoryContentRepository::new()),
            SearchConfig::default(),
            media_config,
        )
    }

    fn build(
        content_repo: Arc<dyn ContentRepository>,
        search_config: SearchConfig,
        media_config: MediaConfig,
    ) -> Self {
        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("mediahub")
            .build();

        let state = AppState {
            content_repo,
            ..AppState::in_memory(search_config, 24, leptos_options)
        };
        let router = mediahub::api::routes::router(&media_config).with_state(state.clone());

        Self { state, router }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Store records directly, bypassing the HTTP layer.
    pub async fn seed(&self, records: Vec<CandidateRecord>) {
        for record in records {
            process_upsert(self.state.content_repo.as_ref(), record)
                .await
                .expect("Failed to seed record");
        }
    }

    pub async fn create_editor(&self) {
        self.state
            .auth_repo
            .create_user_if_absent(User::new(EDITOR_EMAIL, EDITOR_PASSWORD))
            .await
            .expect("Failed to create editor");
    }

    /// Create the editor account and log in; the server keeps the session cookie.
    pub async fn login(&self, server: &axum_test::TestServer) {
        self.create_editor().await;
        server
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "email": EDITOR_EMAIL,
                "password": EDITOR_PASSWORD,
            }))
            .await
            .assert_status_ok();
    }
}

/// Content store whose queries fail for the given categories.
pub struct FailingContentRepository {
    inner: InMemoryContentRepository,
    failing: HashSet<Category>,
}

impl FailingContentRepository {
    pub fn new(records: Vec<CandidateRecord>, failing: &[Category]) -> Self {
        Self {
            inner: InMemoryContentRepository::with_records(records),
            failing: failing.iter().copied().collect(),
        }
    }

    fn check(&self, category: Category) -> Result<(), AppError> {
        if self.failing.contains(&category) {
            Err(AppError::Database(format!("{category} is unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentRepository for FailingContentRepository {
    async fn list_by_category(
        &self,
        category: Category,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        self.check(category)?;
        self.inner.list_by_category(category, limit).await
    }

    async fn find_by_id(
        &self,
        category: Category,
        id: &str,
    ) -> Result<Option<CandidateRecord>, AppError> {
        self.check(category)?;
        self.inner.find_by_id(category, id).await
    }

    async fn find_team_members_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        self.check(Category::TeamMembers)?;
        self.inner.find_team_members_by_name_prefix(prefix, limit).await
    }

    async fn list_by_tag(
        &self,
        category: Category,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        self.check(category)?;
        self.inner.list_by_tag(category, tag, limit).await
    }

    async fn upsert(&self, record: CandidateRecord) -> Result<(), AppError> {
        self.check(record.category())?;
        self.inner.upsert(record).await
    }
}

pub fn story(id: &str, title: &str, tags: &[&str]) -> Story {
    Story {
        id: id.to_string(),
        title: title.to_string(),
        author: "Staff".to_string(),
        content: format!("# {title}\n\nBody of {id}."),
        image_url: None,
        video_url: None,
        video_embedded: false,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: None,
    }
}

pub fn blog(id: &str, title: &str) -> CandidateRecord {
    CandidateRecord::Blog(story(id, title, &[]))
}

pub fn feature(id: &str, title: &str) -> CandidateRecord {
    CandidateRecord::FeatureStory(story(id, title, &[]))
}

pub fn photo(id: &str, title: &str, tags: &[&str]) -> CandidateRecord {
    CandidateRecord::Photo(Photo {
        id: id.to_string(),
        title: title.to_string(),
        image_url: format!("media/{id}.jpg"),
        caption: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    })
}

pub fn video(id: &str, title: &str) -> CandidateRecord {
    CandidateRecord::Video(Video {
        id: id.to_string(),
        title: title.to_string(),
        video_url: format!("media/{id}.mp4"),
        embedded: false,
        description: None,
        tags: vec![],
    })
}

pub fn pdf(id: &str, title: &str) -> CandidateRecord {
    CandidateRecord::Pdf(Pdf {
        id: id.to_string(),
        title: title.to_string(),
        file_url: format!("media/{id}.pdf"),
        description: None,
    })
}

pub fn member(id: &str, name: &str) -> CandidateRecord {
    CandidateRecord::TeamMember(TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        name_lower: normalize(name),
        role: "Reporter".to_string(),
        bio: String::new(),
        image_url: None,
        socials: SocialLinks::default(),
    })
}

/// The sample set used by the search scenarios.
pub fn sample_records() -> Vec<CandidateRecord> {
    vec![
        blog("b1", "Imaan's Journey"),
        blog("b2", "Interview with Imaan"),
        blog("b3", "Harvest Festival"),
        feature("f1", "The Imaan Effect"),
        photo("p1", "Imaan at the Summit", &["people"]),
        video("v1", "Behind the Scenes"),
        pdf("d1", "Annual Report"),
        member("m1", "Imaan Khan"),
        member("m2", "Sara Malik"),
    ]
}
