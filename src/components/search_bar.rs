use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::models::content::Category;

/// Search box with a category selector.
///
/// Submits a plain GET to `/search`, so searches are linkable and work
/// before hydration.
#[component]
pub fn SearchBar() -> impl IntoView {
    let query = use_query_map();
    let term = move || query.read().get("q").unwrap_or_default();
    let selected = move || query.read().get("type").unwrap_or_else(|| "all".to_string());

    view! {
        <form class="search-container" action="/search" method="get">
            <input
                type="search"
                name="q"
                placeholder="Search stories, photos, videos, people..."
                prop:value=term
            />
            <select name="type" prop:value=selected>
                <option value="all">"All"</option>
                {Category::ALL
                    .iter()
                    .map(|category| view! {
                        <option value=category.as_str()>{category.label()}</option>
                    })
                    .collect_view()}
            </select>
            <button type="submit">"Search"</button>
        </form>
    }
}
