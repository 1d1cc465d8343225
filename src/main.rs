// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use study_companion::catalogue::Catalogue;
use study_companion::config::Config;
use study_companion::exam::store::SessionStore;
use study_companion::routes;
use study_companion::state::AppState;
use study_companion::tutor::{DisabledTutor, GeminiTutor, Tutor};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Load the syllabus once; it is read-only afterwards
    tracing::info!("Loading catalogue from {}...", config.data_dir.display());
    let catalogue = Catalogue::load(&config.data_dir)
        .await
        .expect("Failed to load the subject catalogue");
    tracing::info!(
        "Catalogue loaded: {} subjects",
        catalogue.subjects().len()
    );

    let tutor: Arc<dyn Tutor> = match &config.gemini.api_key {
        Some(key) => Arc::new(
            GeminiTutor::new(&config.gemini, key.clone()).expect("Failed to build tutor client"),
        ),
        None => {
            tracing::warn!("GEMINI_API_KEY not set, the ask endpoint will answer with an error");
            Arc::new(DisabledTutor)
        }
    };

    // Create AppState
    let state = AppState {
        catalogue: Arc::new(catalogue),
        sessions: SessionStore::new(config.session_ttl_secs),
        tutor,
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listening address");
    tracing::info!("Listening on {}", config.bind_addr);

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}
