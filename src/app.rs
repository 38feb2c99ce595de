use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::hooks::use_params_map;
use leptos_router::path;

/// HTML document wrapping the app for server-side rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/mediahub.css"/>
        <Title text="MediaHub"/>

        <Router>
            <nav class="top-nav">
                <a class="logo" href="/">"MediaHub"</a>
                <a href="/team">"Team"</a>
                <crate::components::search_bar::SearchBar />
            </nav>
            <main>
                <Routes fallback=|| view! { "Page not found." }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/search") view=crate::components::search_results::SearchPage/>
                    <Route path=path!("/team") view=crate::components::team_directory::TeamDirectory/>
                    <Route path=path!("/content/:category/:id") view=ContentPage/>
                    <Route path=path!("/tags/:tag") view=TagPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <h1>"Welcome to MediaHub"</h1>
        <crate::components::site_info::SiteHome />
    }
}

#[component]
fn ContentPage() -> impl IntoView {
    let params = use_params_map();
    let category = move || params.get().get("category").unwrap_or_default();
    let id = move || params.get().get("id").unwrap_or_default();

    view! {
        {move || view! {
            <crate::components::content_view::ContentView category=category() id=id() />
        }}
    }
}

#[component]
fn TagPage() -> impl IntoView {
    let params = use_params_map();
    let tag = move || {
        params
            .get()
            .get("tag")
            .map(|raw| urlencoding::decode(&raw).map(|t| t.into_owned()).unwrap_or(raw))
            .unwrap_or_default()
    };

    view! {
        <h1>"Tagged: " {tag}</h1>
        {move || view! { <crate::components::content_view::TagView tag=tag() /> }}
    }
}
