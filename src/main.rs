#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use mediahub::app::{shell, App};
    use mediahub::config::AppConfig;
    use mediahub::db::auth_repository::MongoAuthRepository;
    use mediahub::db::repository::MongoContentRepository;
    use mediahub::db::settings_repository::MongoSettingsRepository;
    use mediahub::state::AppState;
    use mediahub::storage::client::S3StorageClient;
    use tower::ServiceBuilder;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediahub=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting MediaHub server...");

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).context("Failed to read Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    let app_state = if config.demo_mode {
        tracing::info!("Demo mode enabled, using in-memory stores");
        let state = AppState::in_memory(
            config.search.clone(),
            config.auth.session_ttl_hours,
            leptos_options.clone(),
        );
        mediahub::demo_seeder::seed_demo_data(&state).await;
        state
    } else {
        let mongo_client = mongodb::Client::with_uri_str(&config.database.uri)
            .await
            .context("Failed to connect to MongoDB")?;
        let mongo_db = mongo_client.database(&config.database.name);
        tracing::info!(database = %config.database.name, "Connected to MongoDB");

        let storage_client = S3StorageClient::from_config(&config.storage).await;
        tracing::info!(bucket = %config.storage.bucket, "S3 storage client initialized");

        AppState {
            content_repo: Arc::new(MongoContentRepository::new(&mongo_db)),
            auth_repo: Arc::new(MongoAuthRepository::new(&mongo_db)),
            settings_repo: Arc::new(MongoSettingsRepository::new(&mongo_db)),
            storage_client: Arc::new(storage_client),
            search_config: config.search.clone(),
            session_ttl_hours: config.auth.session_ttl_hours,
            leptos_options: leptos_options.clone(),
        }
    };

    mediahub::auth::session::ensure_admin(app_state.auth_repo.as_ref(), &config.auth)
        .await
        .context("Failed to create the editor account")?;

    let routes = generate_route_list(App);

    let app = mediahub::api::routes::router(&config.media)
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback_service(ServeDir::new(&site_root))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// The wasm build hydrates from lib.rs::hydrate() instead.
#[cfg(not(feature = "ssr"))]
fn main() {}
