pub mod app;
pub mod error;
pub mod models {
    pub mod content;
}
pub mod search;
pub mod rendering {
    pub mod markdown;
    pub mod media;
}
pub mod components {
    pub mod content_view;
    pub mod modal;
    pub mod result_card;
    pub mod search_bar;
    pub mod search_results;
    pub mod site_info;
    pub mod team_directory;
}
pub mod db {
    #[cfg(feature = "ssr")]
    pub mod auth_repository;
    #[cfg(feature = "ssr")]
    pub mod memory;
    pub mod repository;
    pub mod settings_repository;
}

#[cfg(feature = "ssr")]
pub mod api {
    pub mod content;
    pub mod errors;
    pub mod media;
    pub mod routes;
    pub mod search;
    pub mod site;
}
#[cfg(feature = "ssr")]
pub mod auth {
    pub mod models;
    pub mod session;
}
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod demo_seeder;
#[cfg(feature = "ssr")]
pub mod state;
#[cfg(feature = "ssr")]
pub mod storage {
    pub mod client;
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
