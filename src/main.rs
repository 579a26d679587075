use std::panic;
use std::sync::Arc;
use colab_sync::config::Config;
use colab_sync::routes::create_app;
use colab_sync::services::DocumentStore;
use colab_sync::state::AppState;
use tracing::{info, error, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {

    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Configuration comes first so its log level can seed the filter
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize tracing, RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into()))
        .init();

    info!("Starting server...");
    match &loaded {
        Ok(_) => info!("✅ Configuration loaded successfully"),
        Err(e) => {
            error!("❌ Failed to load configuration: {}", e);
            warn!("Using default configuration");
        }
    }
    info!("Environment: {}", config.environment);

    // One store for the whole process, shared by the hub and the HTTP handlers
    let seeds = config.seed_document_ids();
    info!("Seeding {} documents: {:?}", seeds.len(), seeds);
    let store = Arc::new(DocumentStore::with_documents(seeds));
    let state = AppState::new(store, config.service_name.clone());

    let app = create_app(state, &config);

    let listener = match tokio::net::TcpListener::bind(config.server_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", config.server_address(), e);
            std::process::exit(1);
        }
    };

    info!("🚀 Server running on http://{}", config.server_address());
    info!("📡 WebSocket available at ws://{}/ws?docID=<id>", config.server_address());
    if config.is_development() {
        info!("📚 Swagger UI available at http://{}/swagger", config.server_address());
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
