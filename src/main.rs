// src/main.rs

use dotenvy::dotenv;
use quiz_backend::config::Config;
use quiz_backend::models::{group::GroupRegistry, question::Catalog};
use quiz_backend::routes;
use quiz_backend::state::AppState;
use quiz_backend::store;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
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

    // Load the question catalog. Fatal on failure: the process must not
    // serve traffic with a broken catalog.
    let catalog = match Catalog::load(&config.questions_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load question catalog: {}", e);
            panic!("Failed to load question catalog from {}: {}", config.questions_path, e);
        }
    };
    tracing::info!("Loaded {} questions from {}", catalog.count(), config.questions_path);

    let groups = GroupRegistry::default();

    // Initialize the optional database pool. A missing or unreachable
    // store degrades to stats-disabled mode instead of failing startup.
    let pool = init_pool(&config).await;

    // Create AppState
    let state = AppState {
        catalog: Arc::new(catalog),
        groups: Arc::new(groups),
        pool,
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

async fn init_pool(config: &Config) -> Option<PgPool> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set; attempts and stats are disabled");
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database connection failed, running without stats: {}", e);
            return None;
        }
    };

    if let Err(e) = store::init_schema(&pool).await {
        tracing::error!("Schema init failed, running without stats: {}", e);
        return None;
    }

    tracing::info!("Database connected, schema ready");
    Some(pool)
}
