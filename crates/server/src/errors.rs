use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::multipart::MultipartRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// Error body shared by every JSON endpoint: `{"error": title, "message": detail}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.title, "message": self.detail });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let (status, title) = match &e {
            ServiceError::Validation(_) | ServiceError::Model(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            ServiceError::IncorrectPassword => (StatusCode::BAD_REQUEST, "Incorrect Password"),
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::EmailTaken | ServiceError::PhoneTaken => (StatusCode::CONFLICT, "Duplicate"),
            ServiceError::InUse(_) => (StatusCode::CONFLICT, "In Use"),
            ServiceError::Unauthorized | ServiceError::Token(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ServiceError::Hash(_) | ServiceError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        if status.is_server_error() {
            error!(code = e.code(), err = %e, "request failed");
        }
        Self::new(status, title, Some(e.to_string()))
    }
}

// Extractor rejections are input-shape failures; render them as 400 with the JSON body.
macro_rules! bad_request_from {
    ($($rejection:ty),+ $(,)?) => {
        $(impl From<$rejection> for JsonApiError {
            fn from(r: $rejection) -> Self {
                Self::bad_request(r.body_text())
            }
        })+
    };
}

bad_request_from!(JsonRejection, MultipartRejection, PathRejection, QueryRejection);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::IncorrectPassword, StatusCode::BAD_REQUEST),
            (ServiceError::not_found("store", 1), StatusCode::NOT_FOUND),
            (ServiceError::EmailTaken, StatusCode::CONFLICT),
            (ServiceError::PhoneTaken, StatusCode::CONFLICT),
            (ServiceError::InUse("busy".into()), StatusCode::CONFLICT),
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ServiceError::Token("bad".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }
}
