//! # TaskTrack API Server
//!
//! The HTTP server for TaskTrack: authentication, user and category
//! management, the task lifecycle with its history ledger, and aggregate
//! reports.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasktrack-api
//! ```

use tasktrack_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasktrack_shared::{
    auth::password,
    db::{migrations, pool, seed},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasktrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskTrack API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool and schema
    migrations::ensure_database_exists(&config.database.url).await?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    // First-run bootstrap: seed a default admin if none exists
    let password_hash = password::hash_password_async(config.seed.admin_password.clone()).await?;
    seed::seed_admin(
        &db,
        &config.seed.admin_name,
        &config.seed.admin_email,
        &password_hash,
    )
    .await?;

    // Build and start the server
    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
