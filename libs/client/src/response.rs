use reqwest::StatusCode;
use serde_json::Value;

use crate::ClientError;

pub type Response<T> = Result<T, ClientError>;

pub(crate) trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, reqwest::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| ClientError::Request {
            source: e,
            message: message.to_string(),
        })
    }
}

impl<T> IntoResponse<T> for Result<T, serde_json::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| ClientError::Decode {
            source: e,
            message: message.to_string(),
        })
    }
}

/// Builds the error for a non-2xx answer. The body's `error` field wins over
/// the fallback.
pub(crate) fn api_error(status: StatusCode, body: &str, fallback: &str) -> ClientError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("error")?.as_str().map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    ClientError::Api { status, message }
}
