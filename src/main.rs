use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use worklane_api::config;
use worklane_api::handlers::{admin, clients, projects, tasks, time_entries, workspaces};
use worklane_api::middleware::{
    jwt_auth_middleware, request_id_middleware, tenant_context_middleware,
};
use worklane_api::state::AppState;
use worklane_api::store::{PgTenantDirectory, PgWorkspaceSource};
use worklane_api::tenancy::WorkspaceCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    // A bad TENANCY_ENFORCEMENT value aborts boot here; there is no
    // permissive fallback and no runtime toggle.
    let config = config::init()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!(
        environment = ?config.environment,
        enforcement = config.enforcement.as_str(),
        "starting worklane API"
    );

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("missing configuration: DATABASE_URL"))?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
        .connect(&database_url)
        .await?;

    let workspace_cache = WorkspaceCache::new(
        Arc::new(PgWorkspaceSource::new(pool.clone())),
        Duration::from_secs(config.workspace_cache.ttl_secs),
    );

    let state = AppState {
        pool: pool.clone(),
        mode: config.enforcement,
        workspace_cache,
        tenant_directory: Arc::new(PgTenantDirectory::new(pool)),
    };

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("WORKLANE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("worklane API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected API
        .merge(api_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/api/tasks/:id",
            get(tasks::show).patch(tasks::update).delete(tasks::destroy),
        )
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/:id",
            get(projects::show)
                .patch(projects::update)
                .delete(projects::destroy),
        )
        .route("/api/clients", get(clients::list).post(clients::create))
        .route("/api/clients/:id", get(clients::show))
        .route(
            "/api/time-entries",
            get(time_entries::list).post(time_entries::create),
        )
        .route("/api/time-entries/:id", get(time_entries::show))
        .route("/api/workspace", get(workspaces::current))
        .route("/api/admin/tenants", get(admin::list_tenants))
        .route("/api/admin/tenants/:id", get(admin::show_tenant))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(axum::middleware::from_fn(jwt_auth_middleware))
                .layer(axum::middleware::from_fn_with_state(
                    state,
                    tenant_context_middleware,
                )),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Worklane API",
            "version": version,
            "description": "Multi-tenant work tracking backend (tasks, projects, clients, time entries)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "tasks": "/api/tasks[/:id] (protected)",
                "projects": "/api/projects[/:id] (protected)",
                "clients": "/api/clients[/:id] (protected)",
                "time_entries": "/api/time-entries[/:id] (protected)",
                "workspace": "/api/workspace (protected)",
                "admin": "/api/admin/tenants[/:id] (restricted, platform operators)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok",
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string(),
                }
            })),
        ),
    }
}
