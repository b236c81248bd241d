use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::people::PeopleRepository;

use crate::errors::{ApiError, StatusMapping};
use crate::openapi::ApiDoc;

pub mod people;

/// Shared handler state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub people: Arc<dyn PeopleRepository>,
    pub status_mapping: StatusMapping,
}

impl ServerState {
    pub fn new(people: Arc<dyn PeopleRepository>, status_mapping: StatusMapping) -> Self {
        Self { people, status_mapping }
    }

    pub(crate) fn fail(&self, error: service::errors::ServiceError) -> ApiError {
        ApiError::new(error, self.status_mapping)
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router: one table of (method, path) -> handler.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route(
            "/people/:id",
            get(people::get_person)
                .post(people::set_person)
                .delete(people::remove_person),
        )
        .with_state(state)
        // records are stored whatever their size; no 413 before the handler runs
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
