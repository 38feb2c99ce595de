use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::modal::{ModalState, RecordModal};
use crate::components::result_card::ResultCard;
use crate::models::content::CandidateRecord;

#[server]
pub async fn team_directory(prefix: String) -> Result<Vec<CandidateRecord>, ServerFnError> {
    let state = crate::state::expect_state()?;
    crate::api::content::process_team_directory(state.content_repo.as_ref(), Some(&prefix))
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// The `/team` page: members filtered by the start of their name.
#[component]
pub fn TeamDirectory() -> impl IntoView {
    let query = use_query_map();
    let prefix = Memo::new(move |_| query.read().get("prefix").unwrap_or_default());
    let modal = RwSignal::new(ModalState::<CandidateRecord>::default());
    let members = Resource::new(move || prefix.get(), |prefix| async move { team_directory(prefix).await });

    view! {
        <section class="team-directory">
            <h1>"Our Team"</h1>
            <form action="/team" method="get">
                <input type="search" name="prefix" placeholder="Name starts with..." prop:value=move || prefix.get()/>
                <button type="submit">"Filter"</button>
            </form>
            <Suspense fallback=|| view! { <p>"Loading..."</p> }>
                {move || members.get().map(|res| match res {
                    Ok(members) if members.is_empty() => {
                        view! { <p class="no-results">"No team members found."</p> }.into_any()
                    }
                    Ok(members) => view! {
                        <div class="results">
                            {members
                                .into_iter()
                                .map(|record| view! { <ResultCard record=record modal=modal/> })
                                .collect_view()}
                        </div>
                    }
                    .into_any(),
                    Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
            <RecordModal state=modal/>
        </section>
    }
}
