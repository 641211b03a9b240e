//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   POST   /companies              (admin)
//!   GET    /companies
//!   GET    /companies/:handle
//!   PATCH  /companies/:handle      (admin)
//!   DELETE /companies/:handle      (admin)
//!   POST   /jobs                   (admin)
//!   GET    /jobs
//!   GET    /jobs/:id
//!   PATCH  /jobs/:id               (admin)
//!   DELETE /jobs/:id               (admin)
//!   GET    /healthz, /livez

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use db::DbPool;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod validate;

pub use error::ApiError;

/// Shared per-request state.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    /// HS256 key that bearer tokens are verified against.
    pub secret_key: Arc<str>,
}

impl AppState {
    pub fn new(pool: DbPool, secret_key: impl Into<Arc<str>>) -> Self {
        Self {
            pool,
            secret_key: secret_key.into(),
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    use crate::handlers::{companies, health, jobs};

    let admin = Router::new()
        .route("/companies", post(companies::create))
        .route(
            "/companies/:handle",
            patch(companies::update).delete(companies::remove),
        )
        .route("/jobs", post(jobs::create))
        .route("/jobs/:id", patch(jobs::update).delete(jobs::remove))
        .route_layer(from_fn(auth::ensure_admin));

    let public = Router::new()
        .route("/companies", get(companies::list))
        .route("/companies/:handle", get(companies::get))
        .route("/jobs", get(jobs::list))
        .route("/jobs/:id", get(jobs::get))
        .route("/healthz", get(health::healthz))
        .route("/livez", get(health::livez));

    public
        .merge(admin)
        .layer(from_fn_with_state(state.clone(), auth::authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received ctrl+c, shutting down");
            }
        })
        .await
}

#[cfg(test)]
mod routes_tests;
