//! In-memory repositories backing demo mode and tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::auth::models::{Session, User};
use crate::db::auth_repository::AuthRepository;
use crate::db::repository::ContentRepository;
use crate::db::settings_repository::{Banner, ContactInfo, SettingsRepository, SiteSettings};
use crate::error::AppError;
use crate::models::content::{CandidateRecord, Category};

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, AppError> {
    lock.read()
        .map_err(|_| AppError::Internal("in-memory store lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, AppError> {
    lock.write()
        .map_err(|_| AppError::Internal("in-memory store lock poisoned".into()))
}

#[derive(Default)]
pub struct InMemoryContentRepository {
    records: RwLock<Vec<CandidateRecord>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn select<F>(&self, category: Category, limit: usize, keep: F) -> Result<Vec<CandidateRecord>, AppError>
    where
        F: Fn(&CandidateRecord) -> bool,
    {
        let records = read(&self.records)?;
        let mut selected: Vec<CandidateRecord> = records
            .iter()
            .filter(|r| r.category() == category && keep(r))
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.display_value().cmp(b.display_value()));
        selected.truncate(limit);
        Ok(selected)
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list_by_category(
        &self,
        category: Category,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        self.select(category, limit, |_| true)
    }

    async fn find_by_id(
        &self,
        category: Category,
        id: &str,
    ) -> Result<Option<CandidateRecord>, AppError> {
        Ok(read(&self.records)?
            .iter()
            .find(|r| r.category() == category && r.id() == id)
            .cloned())
    }

    async fn find_team_members_by_name_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        self.select(Category::TeamMembers, limit, |r| match r {
            CandidateRecord::TeamMember(member) => member.name_lower.starts_with(prefix),
            _ => false,
        })
    }

    async fn list_by_tag(
        &self,
        category: Category,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        self.select(category, limit, |r| r.tags().iter().any(|t| t == tag))
    }

    async fn upsert(&self, record: CandidateRecord) -> Result<(), AppError> {
        let mut records = write(&self.records)?;
        records.retain(|r| !(r.category() == record.category() && r.id() == record.id()));
        records.push(record);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAuthRepository {
    users: RwLock<Vec<User>>,
    sessions: RwLock<Vec<Session>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.trim().to_lowercase();
        Ok(read(&self.users)?.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user_if_absent(&self, user: User) -> Result<(), AppError> {
        let mut users = write(&self.users)?;
        if !users.iter().any(|u| u.email == user.email) {
            users.push(user);
        }
        Ok(())
    }

    async fn insert_session(&self, session: Session) -> Result<(), AppError> {
        write(&self.sessions)?.push(session);
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        Ok(read(&self.sessions)?
            .iter()
            .find(|s| s.token_hash == token_hash)
            .cloned())
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        write(&self.sessions)?.retain(|s| s.token_hash != token_hash);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySettingsRepository {
    settings: RwLock<SiteSettings>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get_settings(&self) -> Result<SiteSettings, AppError> {
        Ok(read(&self.settings)?.clone())
    }

    async fn save_settings(
        &self,
        contact: ContactInfo,
        banners: Vec<Banner>,
    ) -> Result<(), AppError> {
        let mut settings = write(&self.settings)?;
        settings.contact = contact;
        settings.banners = banners;
        Ok(())
    }
}
