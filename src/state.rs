use std::sync::Arc;

use crate::db::auth_repository::AuthRepository;
use crate::db::memory::{InMemoryAuthRepository, InMemoryContentRepository, InMemorySettingsRepository};
use crate::db::repository::ContentRepository;
use crate::db::settings_repository::SettingsRepository;
use crate::search::SearchConfig;
use crate::storage::client::{InMemoryStorageClient, StorageClient};

/// Shared state for the axum handlers and the Leptos server functions.
#[derive(Clone)]
pub struct AppState {
    pub content_repo: Arc<dyn ContentRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub storage_client: Arc<dyn StorageClient>,
    pub search_config: SearchConfig,
    pub session_ttl_hours: i64,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl AppState {
    /// State backed entirely by in-memory stores (demo mode and tests).
    pub fn in_memory(
        search_config: SearchConfig,
        session_ttl_hours: i64,
        leptos_options: leptos::prelude::LeptosOptions,
    ) -> Self {
        Self {
            content_repo: Arc::new(InMemoryContentRepository::new()),
            auth_repo: Arc::new(InMemoryAuthRepository::new()),
            settings_repo: Arc::new(InMemorySettingsRepository::new()),
            storage_client: Arc::new(InMemoryStorageClient::new()),
            search_config,
            session_ttl_hours,
            leptos_options,
        }
    }
}

impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

/// Fetch the application state from the Leptos context inside a server function.
pub fn expect_state() -> Result<AppState, leptos::prelude::ServerFnError> {
    leptos::prelude::use_context::<AppState>()
        .ok_or_else(|| leptos::prelude::ServerFnError::new("AppState not found in context"))
}
