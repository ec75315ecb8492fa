//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the portal's REST endpoints under a single Axum router. List
//! retrieval keeps the original portal paths (`POST /api/innovation` and
//! friends), so the kind segment is matched after the static mutation routes.

pub mod auth;
pub mod records;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/create", post(records::create))
        .route("/api/update", put(records::update))
        .route("/api/delete", post(records::delete_by_body))
        .route("/api/delete/{kind}", delete(records::delete_by_kind))
        .route("/api/{kind}", post(records::list))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
