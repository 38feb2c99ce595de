use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::modal::{ModalState, RecordModal};
use crate::components::result_card::ResultCard;
use crate::error::SEARCH_FAILED_MESSAGE;
use crate::models::content::{CandidateRecord, Category};
use crate::search::generation::SearchGenerations;
use crate::search::normalize::normalize;
use crate::search::SearchOutcome;

#[server]
pub async fn search_content(
    q: String,
    category: Option<String>,
) -> Result<SearchOutcome, ServerFnError> {
    use crate::api::search::{process_search, SearchParams};
    use crate::error::AppError;

    let state = crate::state::expect_state()?;
    let params = SearchParams {
        q: Some(q),
        category,
    };

    process_search(state.content_repo.as_ref(), &state.search_config, params)
        .await
        .map_err(|e| match e {
            AppError::BadRequest(msg) => ServerFnError::new(msg),
            _ => ServerFnError::new(SEARCH_FAILED_MESSAGE),
        })
}

fn error_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(msg) => msg.clone(),
        _ => SEARCH_FAILED_MESSAGE.to_string(),
    }
}

fn failed_categories_notice(failed: &[Category]) -> Option<String> {
    if failed.is_empty() {
        return None;
    }
    let labels = failed
        .iter()
        .map(Category::label)
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("Some results may be missing: {labels} could not be searched."))
}

/// The `/search` page.
///
/// Reads `q` and `type` from the URL. A blank term shows a hint and issues no
/// query; otherwise results are grouped as returned (prefix matches first).
#[component]
pub fn SearchPage() -> impl IntoView {
    let query = use_query_map();
    let term = Memo::new(move |_| query.read().get("q").unwrap_or_default());
    let category = Memo::new(move |_| query.read().get("type").filter(|t| !t.is_empty()));
    let is_blank = move || normalize(&term.get()).is_empty();

    let modal = RwSignal::new(ModalState::<CandidateRecord>::default());
    let generations = Arc::new(SearchGenerations::new());

    let results = Resource::new(
        move || (term.get(), category.get()),
        move |(q, category)| {
            let generations = Arc::clone(&generations);
            async move {
                if normalize(&q).is_empty() {
                    return None;
                }
                let generation = generations.begin();
                let outcome = search_content(q, category).await;
                // A newer search started while this one was in flight.
                generations.is_current(generation).then_some(outcome)
            }
        },
    );

    view! {
        <section class="search-page">
            <Show
                when=move || !is_blank()
                fallback=|| view! { <p class="hint">"Type something to search the site."</p> }
            >
                <Suspense fallback=|| view! { <p>"Searching..."</p> }>
                    {move || results.get().flatten().map(|res| match res {
                        Ok(outcome) => view! { <SearchResults outcome=outcome modal=modal/> }.into_any(),
                        Err(e) => view! { <p class="error">{error_message(&e)}</p> }.into_any(),
                    })}
                </Suspense>
            </Show>
            <RecordModal state=modal/>
        </section>
    }
}

#[component]
fn SearchResults(
    outcome: SearchOutcome,
    modal: RwSignal<ModalState<CandidateRecord>>,
) -> impl IntoView {
    let notice = failed_categories_notice(&outcome.failed_categories);
    let count = outcome.results.len();
    let summary = format!("{count} results for \"{}\"", outcome.term);

    view! {
        {notice.map(|n| view! { <p class="warning">{n}</p> })}
        {if outcome.results.is_empty() {
            view! { <p class="no-results">"No results found."</p> }.into_any()
        } else {
            view! {
                <p class="result-count">{summary}</p>
                <div class="results">
                    {outcome
                        .results
                        .into_iter()
                        .map(|result| view! { <ResultCard record=result.record modal=modal/> })
                        .collect_view()}
                </div>
            }
            .into_any()
        }}
    }
}
