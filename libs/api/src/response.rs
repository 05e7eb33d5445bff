use axum::{http::StatusCode, response::IntoResponse, Json};
use repository::RepositoryError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::ApiError;

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct ErrorResp {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct MessageResp {
    pub message: String,
}

impl MessageResp {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

impl ErrorResp {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            details: None,
            hint: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, body) = match self {
            ApiError::ClientError(message) => {
                (StatusCode::BAD_REQUEST, ErrorResp::new(&message))
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, ErrorResp::new(&message))
            }
            ApiError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, ErrorResp::new(&message))
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResp::new("Method not allowed"),
            ),
            ApiError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResp {
                    details: Some(
                        "DATABASE_URL is not set for this server.".to_string(),
                    ),
                    hint: Some(
                        "Set DATABASE_URL in the environment or in the secrets \
                         file and restart the server."
                            .to_string(),
                    ),
                    ..ErrorResp::new("Database not configured")
                },
            ),
            ApiError::SchemaMissing(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResp {
                    details: Some(details),
                    hint: Some(
                        "The post and comment tables do not exist. Enable \
                         database.run_migrations in the config and restart \
                         the server."
                            .to_string(),
                    ),
                    ..ErrorResp::new("Database schema missing")
                },
            ),
            ApiError::ServerError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResp {
                    details: Some(details),
                    ..ErrorResp::new("Internal server error")
                },
            ),
        };

        (status_code, Json(body)).into_response()
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, task: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for Result<T, RepositoryError> {
    fn into_response(self, task: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(task = task, error = e.to_string());

            if e.is_schema_missing() {
                ApiError::SchemaMissing(e.to_string())
            } else {
                ApiError::ServerError(e.to_string())
            }
        })
    }
}

#[cfg(test)]
mod test {
    use axum::response::IntoResponse;
    use serde_json::{json, Value};

    use super::*;

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_codes() {
        let cases = [
            (ApiError::ClientError("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (ApiError::NotConfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (
                ApiError::SchemaMissing("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::ServerError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(render(error).await.0, expected);
        }
    }

    #[tokio::test]
    async fn test_client_error_body_is_just_the_message() {
        let (_, body) =
            render(ApiError::ClientError("Title is required".into())).await;

        assert_eq!(body, json!({"error": "Title is required"}));
    }

    #[tokio::test]
    async fn test_server_errors_tell_the_causes_apart() {
        let (_, not_configured) = render(ApiError::NotConfigured).await;
        let (_, schema) =
            render(ApiError::SchemaMissing("no such table: post".into())).await;
        let (_, internal) =
            render(ApiError::ServerError("connection reset".into())).await;

        assert_eq!(not_configured["error"], "Database not configured");
        assert!(not_configured["hint"].is_string());
        assert_eq!(schema["error"], "Database schema missing");
        assert_eq!(schema["details"], "no such table: post");
        assert!(schema["hint"].as_str().unwrap().contains("run_migrations"));
        assert_eq!(internal["error"], "Internal server error");
        assert_eq!(internal["details"], "connection reset");
        assert!(internal.get("hint").is_none());
    }
}
