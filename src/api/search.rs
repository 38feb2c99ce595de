use serde::Deserialize;

use crate::db::repository::ContentRepository;
use crate::error::AppError;
use crate::search::{run_search, SearchConfig, SearchOutcome, SearchQuery};

/// Query-string parameters of a search: `q` and the optional `type`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
}

/// Core search logic shared by the JSON endpoint and the search page.
pub async fn process_search(
    repo: &dyn ContentRepository,
    config: &SearchConfig,
    params: SearchParams,
) -> Result<SearchOutcome, AppError> {
    let term = params.q.unwrap_or_default();
    let query = SearchQuery::parse(&term, params.category.as_deref())?;

    run_search(repo, &query, config).await.inspect_err(|e| {
        tracing::error!(term = %query.term, scope = query.scope.as_param(), error = %e, "search failed");
    })
}

/// Axum handler for `GET /api/v1/search?q=...&type=...`.
pub async fn search_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Query(params): axum::extract::Query<SearchParams>,
) -> Result<axum::Json<SearchOutcome>, AppError> {
    let outcome = process_search(state.content_repo.as_ref(), &state.search_config, params).await?;
    Ok(axum::Json(outcome))
}
