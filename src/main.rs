use axum::extract::State;
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use devmarket_api::config::AppConfig;
use devmarket_api::database;
use devmarket_api::handlers::{accounts, auth, listings, profiles};
use devmarket_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devmarket_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("starting devmarket API in {:?} mode", config.environment);

    let pool = database::build_pool(&config.database)
        .unwrap_or_else(|e| panic!("invalid database configuration: {}", e));

    // The pool connects lazily; a cold database surfaces here as a warning
    // and again on /health, not as a startup crash.
    if let Err(e) = database::MIGRATOR.run(&pool).await {
        tracing::warn!("migrations not applied: {}", e);
    }

    let port = config.server.port;
    let state = AppState::new(pool, config);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("devmarket API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Operational
        .route("/", get(root))
        .route("/health", get(health))
        // Resources
        .merge(account_routes())
        .merge(profile_routes())
        .merge(listing_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(accounts::register).get(accounts::list))
        .route("/api/auth", post(auth::login))
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profile/me", get(profiles::me))
        .route(
            "/api/profile",
            post(profiles::upsert)
                .get(profiles::list)
                .delete(profiles::delete_mine),
        )
        .route("/api/profile/user/:user_id", get(profiles::by_account))
        .route("/api/profile/exp", put(profiles::add_experience))
        .route("/api/profile/exp/:exp_id", delete(profiles::remove_experience))
}

fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", post(listings::create))
        .route("/api/products/update/:product_id", put(listings::update))
        .route("/api/products/delete/:product_id", delete(listings::delete))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "devmarket API",
        "version": version,
        "endpoints": {
            "users": "/api/users (POST public, GET auth)",
            "auth": "/api/auth (POST public)",
            "profile": "/api/profile[/me, /user/:user_id, /exp[/:exp_id]]",
            "products": "/api/products[/update/:product_id, /delete/:product_id]",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
