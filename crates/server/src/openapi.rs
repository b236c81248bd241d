use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Record as it appears in request and response bodies.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDoc { pub first_name: String, pub second_name: String, pub age: i64 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::people::get_person,
        crate::routes::people::set_person,
        crate::routes::people::remove_person,
    ),
    components(
        schemas(
            HealthResponse,
            PersonDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "people")
    )
)]
pub struct ApiDoc;
