use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use service::errors::ServiceError;
use service::people::{parse_key, Person, PersonId};
use tracing::info;

use super::ServerState;
use crate::errors::ApiError;

/// A segment axum cannot decode (e.g. `%FF`) is an invalid key like any other,
/// so it goes through the configured status mapping.
fn person_id(state: &ServerState, path: Result<Path<String>, PathRejection>) -> Result<PersonId, ApiError> {
    let Path(raw_id) = path.map_err(|e| state.fail(ServiceError::InvalidKey(e.body_text())))?;
    parse_key(&raw_id).map_err(|e| state.fail(e))
}

#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i64, Path, description = "person id")),
    responses(
        (status = 200, description = "person response", body = crate::openapi::PersonDoc),
        (status = 500, description = "any error (400/404 in strict mode)")
    )
)]
pub async fn get_person(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Person>, ApiError> {
    let id = person_id(&state, path)?;
    let person = state.people.get(id).await.map_err(|e| state.fail(e))?;
    Ok(Json(person))
}

#[utoipa::path(
    post,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i64, Path, description = "person id")),
    request_body = crate::openapi::PersonDoc,
    responses(
        (status = 200, description = "person stored"),
        (status = 500, description = "any error (400 in strict mode)")
    )
)]
pub async fn set_person(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let id = person_id(&state, path)?;
    let body = body.map_err(|e| state.fail(ServiceError::InvalidBody(e.body_text())))?;
    let person = Person::from_json(&body).map_err(|e| state.fail(e))?;
    state.people.set(id, person).await.map_err(|e| state.fail(e))?;
    info!(%id, event = "person_set", "person stored");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i64, Path, description = "person id")),
    responses(
        (status = 200, description = "person removed, or was never there"),
        (status = 500, description = "any error (400 in strict mode)")
    )
)]
pub async fn remove_person(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = person_id(&state, path)?;
    state.people.remove(id).await.map_err(|e| state.fail(e))?;
    info!(%id, event = "person_removed", "person removed");
    Ok(StatusCode::OK)
}
