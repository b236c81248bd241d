use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::{error, warn};

/// How store failures become HTTP statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusMapping {
    /// Every failure is a bare 500; callers cannot tell kinds apart.
    #[default]
    Collapsed,
    /// 400 for malformed keys and bodies, 404 for missing records, 500 otherwise,
    /// with a JSON error body.
    Strict,
}

impl StatusMapping {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Collapsed }
    }

    pub fn status_for(self, err: &ServiceError) -> StatusCode {
        match (self, err) {
            (Self::Collapsed, _) => StatusCode::INTERNAL_SERVER_ERROR,
            (Self::Strict, ServiceError::InvalidKey(_) | ServiceError::InvalidBody(_)) => StatusCode::BAD_REQUEST,
            (Self::Strict, ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            (Self::Strict, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A store failure on its way out of a handler.
#[derive(Debug)]
pub struct ApiError {
    pub error: ServiceError,
    pub mapping: StatusMapping,
}

impl ApiError {
    pub fn new(error: ServiceError, mapping: StatusMapping) -> Self {
        Self { error, mapping }
    }

    pub fn status(&self) -> StatusCode {
        self.mapping.status_for(&self.error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.error.to_string();
        let code = self.error.code();
        if self.error.is_client_error() {
            warn!(error = %msg, code, status = status.as_u16(), "request rejected");
        } else {
            error!(error = %msg, code, status = status.as_u16(), "store operation failed");
        }
        match self.mapping {
            StatusMapping::Collapsed => status.into_response(),
            StatusMapping::Strict => (status, Json(serde_json::json!({"error": msg, "code": code}))).into_response(),
        }
    }
}
