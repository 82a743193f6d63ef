use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod throttle;
pub mod youtube;

use crate::middleware::{admin_middleware, jwt_auth_middleware};

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Open catalog reads and auth entry points
        .merge(public_routes())
        // JWT required
        .merge(protected_routes())
        // JWT + admin claim required
        .merge(elevated_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::{auth, categories, comments, subcategories, tags, videos};

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/api/videos", get(videos::list))
        .route("/api/videos/:id", get(videos::get))
        .route("/api/categories", get(categories::list))
        .route("/api/categories/:id", get(categories::get))
        .route("/api/subcategories", get(subcategories::list))
        .route("/api/subcategories/:id", get(subcategories::get))
        .route("/api/tags", get(tags::list))
        .route("/api/tags/:id", get(tags::get))
        .route("/api/comments", get(comments::list))
}

fn protected_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::protected::{auth, comments, ratings, users};

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/comments", post(comments::create))
        .route(
            "/api/comments/:id",
            put(comments::update).delete(comments::delete),
        )
        .route("/api/ratings", get(ratings::get).post(ratings::rate))
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

fn elevated_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::elevated::{
        activity, categories, channels, import, subcategories, tags, users, videos,
    };

    Router::new()
        .route("/api/videos", post(videos::create))
        .route("/api/videos/:id", put(videos::update).delete(videos::delete))
        .route("/api/categories", post(categories::create))
        .route(
            "/api/categories/:id",
            put(categories::update).delete(categories::delete),
        )
        .route("/api/subcategories", post(subcategories::create))
        .route(
            "/api/subcategories/:id",
            put(subcategories::update).delete(subcategories::delete),
        )
        .route("/api/tags", post(tags::create))
        .route("/api/tags/:id", put(tags::update).delete(tags::delete))
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/import/youtube", post(import::import_youtube))
        .route("/api/channels", get(channels::list).post(channels::create))
        .route(
            "/api/channels/:id",
            put(channels::update).delete(channels::delete),
        )
        .route("/api/channels/check", post(channels::check))
        .route("/api/activity", get(activity::list))
        // Innermost first: the JWT layer runs before the admin check
        .route_layer(axum::middleware::from_fn(admin_middleware))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Vidcat API",
            "version": version,
            "description": "Video catalog REST API with YouTube playlist import",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login (public), /api/auth/* (protected)",
                "catalog": "/api/videos, /api/categories, /api/subcategories, /api/tags (public reads)",
                "comments": "/api/comments (read public, write protected)",
                "ratings": "/api/ratings (protected)",
                "users": "/api/users (admin), /api/users/:id (owner or admin)",
                "import": "/api/import/youtube, /api/channels (admin)",
                "activity": "/api/activity (admin)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
