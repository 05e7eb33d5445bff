use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::ApiState;

/// Liveness only. Database trouble is reported by `/diagnostic`.
pub(super) async fn get_health(
    State(state): State<ApiState>,
) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "databaseConfigured": state.repo.is_some(),
        })),
    )
}
