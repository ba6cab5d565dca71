/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasktrack_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tasktrack_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tasktrack_shared::auth::{actor::Actor, jwt};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// └── /api/
///     ├── /auth/login                # POST (public)
///     ├── /users                     # GET, POST; DELETE /:id
///     │   ├── /:id/password          # PUT (reset by admin/manager)
///     │   └── /me/password           # PUT (change own)
///     ├── /categories                # GET, POST; PUT, DELETE /:id
///     ├── /tasks                     # GET, POST
///     │   ├── /:id                   # PUT (edit), DELETE
///     │   ├── /:id/status            # PUT
///     │   ├── /:id/reassign          # PUT
///     │   └── /:id/history           # GET
///     └── /reports/summary           # GET
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (everything under /api except /api/auth)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new().route("/login", post(routes::auth::login));

    // Everything else requires a valid bearer token
    let protected_routes = Router::new()
        .route("/users", post(routes::users::create_user))
        .route("/users", get(routes::users::list_users))
        .route("/users/me/password", put(routes::users::change_password))
        .route("/users/:id/password", put(routes::users::reset_password))
        .route("/users/:id", delete(routes::users::delete_user))
        .route("/categories", get(routes::categories::list_categories))
        .route("/categories", post(routes::categories::create_category))
        .route("/categories/:id", put(routes::categories::rename_category))
        .route(
            "/categories/:id",
            delete(routes::categories::delete_category),
        )
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks/:id/status", put(routes::tasks::update_status))
        .route("/tasks/:id/reassign", put(routes::tasks::reassign_task))
        .route("/tasks/:id/history", get(routes::tasks::task_history))
        .route("/tasks/:id", put(routes::tasks::edit_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route("/reports/summary", get(routes::reports::summary))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Build complete /api surface
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the bearer token from the Authorization header,
/// then injects the resolved [`Actor`] into request extensions. Nothing
/// past this layer re-parses tokens.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::error::ApiError::BadRequest("Expected Bearer token".to_string()))?;

    // Validate token
    let claims = jwt::validate_token(token, state.jwt_secret())?;

    // Insert the actor into request extensions
    let actor = Actor::from_claims(&claims);
    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}
