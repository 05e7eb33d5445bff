use axum::http::StatusCode;

use crate::ApiError;

pub(super) async fn get_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub(super) async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub(super) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
