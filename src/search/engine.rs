use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::db::repository::ContentRepository;
use crate::error::AppError;
use crate::models::content::{CandidateRecord, Category, CategoryFilter};
use crate::search::normalize::normalize;

/// Default cap on records fetched per category.
pub const DEFAULT_LIMIT_PER_CATEGORY: usize = 50;

/// What a search does when some category queries fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Failing categories contribute nothing; the search fails only if all of them fail.
    #[default]
    Isolate,
    /// Any failing category fails the whole search.
    FailFast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit_per_category: usize,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT_PER_CATEGORY
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit_per_category: DEFAULT_LIMIT_PER_CATEGORY,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The term as the user typed it.
    pub term: String,
    pub scope: CategoryFilter,
}

impl SearchQuery {
    /// Build a query from the `q` and `type` parameters.
    ///
    /// The term must contain something other than whitespace.
    pub fn parse(term: &str, category: Option<&str>) -> Result<Self, AppError> {
        if normalize(term).is_empty() {
            return Err(AppError::BadRequest("Search term cannot be empty".into()));
        }

        Ok(Self {
            term: term.to_string(),
            scope: CategoryFilter::parse(category)?,
        })
    }
}

/// A record that matched, and whether it matched at the start of its display field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub record: CandidateRecord,
    pub is_prefix_match: bool,
}

/// The merged output of one fan-out.
#[derive(Debug, Clone, Default)]
pub struct FanOut {
    /// Records in category enumeration order, each category in its store order.
    pub candidates: Vec<CandidateRecord>,
    pub failed_categories: Vec<Category>,
}

/// The response to one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub term: String,
    pub scope: CategoryFilter,
    pub results: Vec<ScoredResult>,
    /// Categories whose query failed and therefore contributed no results.
    #[serde(default)]
    pub failed_categories: Vec<Category>,
}

/// Issue one bounded list query per category in scope and merge the results.
///
/// Queries run concurrently; the merge waits for all of them and orders the
/// candidates by category enumeration order, not completion order.
pub async fn fan_out(
    repo: &dyn ContentRepository,
    scope: CategoryFilter,
    limit: usize,
    policy: FailurePolicy,
) -> Result<FanOut, AppError> {
    let categories = scope.categories();
    let responses = join_all(
        categories
            .iter()
            .map(|category| repo.list_by_category(*category, limit)),
    )
    .await;

    let mut merged = FanOut::default();
    for (category, response) in categories.into_iter().zip(responses) {
        match response {
            Ok(records) => merged.candidates.extend(
                // A store returning foreign records must not leak them into this category.
                records.into_iter().filter(|r| r.category() == category),
            ),
            Err(e) => match policy {
                FailurePolicy::FailFast => {
                    tracing::error!(%category, error = %e, "category query failed, aborting search");
                    return Err(AppError::Search);
                }
                FailurePolicy::Isolate => {
                    tracing::warn!(%category, error = %e, "category query failed, skipping category");
                    merged.failed_categories.push(category);
                }
            },
        }
    }

    if !merged.failed_categories.is_empty()
        && merged.failed_categories.len() == scope.categories().len()
    {
        tracing::error!(scope = scope.as_param(), "every category query failed");
        return Err(AppError::Search);
    }

    Ok(merged)
}

/// Keep the candidates whose normalized display field contains the normalized term,
/// flagging those that start with it.
pub fn filter_candidates(candidates: Vec<CandidateRecord>, term: &str) -> Vec<ScoredResult> {
    let needle = normalize(term);

    candidates
        .into_iter()
        .filter_map(|record| {
            let haystack = normalize(record.display_value());
            haystack.contains(&needle).then(|| ScoredResult {
                is_prefix_match: haystack.starts_with(&needle),
                record,
            })
        })
        .collect()
}

/// Stable two-bucket ordering: prefix matches first, then substring-only matches.
pub fn order_by_relevance(results: Vec<ScoredResult>) -> Vec<ScoredResult> {
    let (mut prefix, substring): (Vec<_>, Vec<_>) =
        results.into_iter().partition(|r| r.is_prefix_match);
    prefix.extend(substring);
    prefix
}

/// Run a complete search: fan-out, filter, order.
pub async fn run_search(
    repo: &dyn ContentRepository,
    query: &SearchQuery,
    config: &SearchConfig,
) -> Result<SearchOutcome, AppError> {
    let fan_out = fan_out(
        repo,
        query.scope,
        config.limit_per_category,
        config.failure_policy,
    )
    .await?;

    let candidate_count = fan_out.candidates.len();
    let results = order_by_relevance(filter_candidates(fan_out.candidates, &query.term));

    tracing::debug!(
        term = %query.term,
        scope = query.scope.as_param(),
        candidates = candidate_count,
        results = results.len(),
        "search completed"
    );

    Ok(SearchOutcome {
        term: query.term.clone(),
        scope: query.scope,
        results,
        failed_categories: fan_out.failed_categories,
    })
}
