use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use utoipa::IntoParams;

use crate::ApiError;

/// `Json` whose rejections answer with the 400 error body.
pub(crate) struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::ClientError(format!(
                "Invalid request body: {}",
                rejection.body_text()
            ))),
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdParam {
    /// Id of the row to delete
    pub id: Option<String>,
}

/// The trimmed value, or `None` when it is missing or blank.
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an id from a query string; `missing` is the 400 message.
pub(crate) fn parse_id(raw: Option<String>, missing: &str) -> Result<i32, ApiError> {
    let Some(raw) = trimmed(raw) else {
        return Err(ApiError::ClientError(missing.to_string()));
    };

    raw.parse::<i32>()
        .map_err(|_| ApiError::ClientError(format!("Invalid id: {raw}")))
}
