use leptos::prelude::*;

use crate::components::modal::{ModalState, RecordModal};
use crate::components::result_card::{MediaView, RecordDetails, ResultCard};
use crate::models::content::{CandidateRecord, Story};
use crate::rendering::markdown::render_markdown;
use crate::rendering::media::MediaSelection;

#[server]
pub async fn get_content(category: String, id: String) -> Result<CandidateRecord, ServerFnError> {
    let state = crate::state::expect_state()?;
    crate::api::content::process_get(state.content_repo.as_ref(), &category, &id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server]
pub async fn browse_tag(tag: String) -> Result<Vec<CandidateRecord>, ServerFnError> {
    use crate::models::content::CategoryFilter;

    let state = crate::state::expect_state()?;
    crate::api::content::process_tag_browse(state.content_repo.as_ref(), &tag, CategoryFilter::All)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Detail view of one record.
#[component]
pub fn ContentView(category: String, id: String) -> impl IntoView {
    let record = Resource::new(
        move || (category.clone(), id.clone()),
        |(category, id)| async move { get_content(category, id).await },
    );

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || record.get().map(|res| match res {
                Ok(CandidateRecord::Blog(story)) | Ok(CandidateRecord::FeatureStory(story)) => {
                    view! { <StoryView story=story/> }.into_any()
                }
                Ok(other) => view! { <RecordDetails record=other/> }.into_any(),
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn StoryView(story: Story) -> impl IntoView {
    let media = MediaSelection::for_story(&story);
    let body = render_markdown(&story.content);
    let published = story
        .created_at
        .map(|at| at.format("%B %-d, %Y").to_string());

    view! {
        <article class="story">
            <h1>{story.title}</h1>
            <p class="byline">
                {story.author}
                {published.map(|p| view! { <span class="date">" · " {p}</span> })}
            </p>
            <MediaView selection=media/>
            <div class="story-body" inner_html=body></div>
        </article>
    }
}

/// Everything carrying one tag, across the tag-bearing categories.
#[component]
pub fn TagView(tag: String) -> impl IntoView {
    let modal = RwSignal::new(ModalState::<CandidateRecord>::default());
    let records = Resource::new(move || tag.clone(), |tag| async move { browse_tag(tag).await });

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || records.get().map(|res| match res {
                Ok(records) if records.is_empty() => {
                    view! { <p class="no-results">"Nothing tagged yet."</p> }.into_any()
                }
                Ok(records) => view! {
                    <div class="results">
                        {records
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
    }
}
