use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use repository::Outcome;
use tracing::info;

pub mod request;
pub mod response;

use crate::request::{parse_id, trimmed, IdParam, JsonBody};
use crate::response::{ApiResponse, ErrorResp, IntoApiResponse, MessageResp};
use crate::{ApiError, ApiState};

use self::request::{CreateCommentReq, ReplaceCommentReq};
use self::response::CommentResp;

/// Add a comment to a post
#[utoipa::path(
    post,
    path = "/comments",
    request_body = CreateCommentReq,
    responses(
        (status = 201, description = "Add a comment successfully", body = CommentResp),
        (status = 400, description = "Post id or text is missing", body = ErrorResp),
        (status = 404, description = "Post not found", body = ErrorResp)
    )
)]
pub async fn create_comment(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<CreateCommentReq>,
) -> ApiResponse<(StatusCode, Json<CommentResp>)> {
    let (Some(post_id), Some(text)) = (body.post_id, trimmed(body.text)) else {
        return Err(ApiError::ClientError(
            "Post ID and comment text are required".to_string(),
        ));
    };

    let outcome = state
        .repo()?
        .comment
        .create(post_id, text)
        .await
        .into_response("create comment")?;

    match outcome {
        Outcome::Done(comment) => {
            info!(task = "create comment", id = comment.id, post_id);
            Ok((StatusCode::CREATED, Json(comment.into())))
        }
        Outcome::NotFound | Outcome::Demo => {
            Err(ApiError::NotFound("Post not found".to_string()))
        }
    }
}

/// Replace the text of a comment
#[utoipa::path(
    put,
    path = "/comments",
    request_body = ReplaceCommentReq,
    responses(
        (status = 200, description = "Replace a comment successfully", body = CommentResp),
        (status = 400, description = "Id or text is missing", body = ErrorResp),
        (status = 404, description = "Comment not found", body = ErrorResp)
    )
)]
pub async fn replace_comment(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<ReplaceCommentReq>,
) -> ApiResponse<Json<CommentResp>> {
    let (Some(id), Some(text)) = (body.id, trimmed(body.text)) else {
        return Err(ApiError::ClientError(
            "Comment ID and text are required".to_string(),
        ));
    };

    let comment = state
        .repo()?
        .comment
        .replace(id, text)
        .await
        .into_response("replace comment")?;

    let Some(comment) = comment else {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    };

    info!(task = "replace comment", id);

    Ok(Json(comment.into()))
}

/// Delete a comment
#[utoipa::path(
    delete,
    path = "/comments",
    params(IdParam),
    responses(
        (status = 200, description = "Delete a comment successfully", body = MessageResp),
        (status = 400, description = "Id is missing", body = ErrorResp),
        (status = 404, description = "Comment not found", body = ErrorResp)
    )
)]
pub async fn delete_comment(
    State(state): State<ApiState>,
    Query(params): Query<IdParam>,
) -> ApiResponse<Json<MessageResp>> {
    let id = parse_id(params.id, "Comment ID is required")?;

    let deleted = state
        .repo()?
        .comment
        .delete(id)
        .await
        .into_response("delete comment")?;

    if !deleted {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }

    info!(task = "delete comment", id);

    Ok(MessageResp::new("Comment deleted successfully"))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::test_support::*;

    async fn new_post(app: &axum::Router) -> Value {
        let (_, post) =
            send(app, "POST", "/posts", Some(json!({"title": "thread"}))).await;
        post
    }

    async fn fetch_post(app: &axum::Router, id: &Value) -> Option<Value> {
        let (_, posts) = send(app, "GET", "/posts", None).await;
        posts.as_array().unwrap().iter().find(|p| &p["id"] == id).cloned()
    }

    #[tokio::test]
    async fn test_comment_round_trip() {
        // Arrange
        let app = app().await;
        let post = new_post(&app).await;

        // Act
        let (created_status, comment) = send(
            &app,
            "POST",
            "/comments",
            Some(json!({"postId": post["id"], "text": "  see the FAQ  "})),
        )
        .await;
        let with_comment = fetch_post(&app, &post["id"]).await.unwrap();
        let (deleted_status, message) = send(
            &app,
            "DELETE",
            &format!("/comments?id={}", comment["id"]),
            None,
        )
        .await;
        let without_comment = fetch_post(&app, &post["id"]).await.unwrap();

        // Assert
        assert_eq!(created_status, StatusCode::CREATED);
        assert_eq!(comment["text"], "see the FAQ");
        assert_eq!(comment["postId"], post["id"]);
        assert_eq!(with_comment["comments"], json!([comment]));
        assert_eq!(deleted_status, StatusCode::OK);
        assert_eq!(message, json!({"message": "Comment deleted successfully"}));
        assert_eq!(without_comment["comments"], json!([]));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let app = app().await;
        let post = new_post(&app).await;

        for body in [
            json!({"postId": post["id"]}),
            json!({"postId": post["id"], "text": "   "}),
            json!({"text": "orphan"}),
        ] {
            let (status, error) = send(&app, "POST", "/comments", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(error["error"], "Post ID and comment text are required");
        }
    }

    #[tokio::test]
    async fn test_create_under_unknown_post_is_404() {
        let app = app().await;

        let (status, error) = send(
            &app,
            "POST",
            "/comments",
            Some(json!({"postId": 31337, "text": "hello?"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"], "Post not found");
    }

    #[tokio::test]
    async fn test_mistyped_body_is_a_400_with_json_error() {
        let app = app().await;

        let (status, error) = send(
            &app,
            "POST",
            "/comments",
            Some(json!({"postId": "abc", "text": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].as_str().unwrap().starts_with("Invalid request body"));

        let (status, _) =
            send(&app, "PUT", "/comments", Some(json!({"id": 1, "text": ["x"]}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_replace_comment() {
        // Arrange
        let app = app().await;
        let post = new_post(&app).await;
        let (_, comment) = send(
            &app,
            "POST",
            "/comments",
            Some(json!({"postId": post["id"], "text": "typo"})),
        )
        .await;

        // Act
        let (status, updated) = send(
            &app,
            "PUT",
            "/comments",
            Some(json!({"id": comment["id"], "text": " fixed "})),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["text"], "fixed");
        assert_eq!(updated["id"], comment["id"]);
        assert_eq!(updated["timestamp"], comment["timestamp"]);
    }

    #[tokio::test]
    async fn test_replace_missing_comment() {
        let app = app().await;

        let (status, error) = send(
            &app,
            "PUT",
            "/comments",
            Some(json!({"id": 4040, "text": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"], "Comment not found");

        let (status, error) =
            send(&app, "PUT", "/comments", Some(json!({"id": 4040}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "Comment ID and text are required");
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_404_every_time() {
        let app = app().await;

        for _ in 0..2 {
            let (status, _) = send(&app, "DELETE", "/comments?id=888", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }

        let (status, error) = send(&app, "DELETE", "/comments", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "Comment ID is required");
    }

    #[tokio::test]
    async fn test_deleting_post_removes_its_comments() {
        // Arrange
        let app = app().await;
        let post = new_post(&app).await;
        let mut comment_ids = vec![];
        for text in ["one", "two", "three"] {
            let (_, comment) = send(
                &app,
                "POST",
                "/comments",
                Some(json!({"postId": post["id"], "text": text})),
            )
            .await;
            comment_ids.push(comment["id"].clone());
        }

        // Act
        send(&app, "DELETE", &format!("/posts?id={}", post["id"]), None).await;

        // Assert
        for id in comment_ids {
            let (status, _) = send(
                &app,
                "PUT",
                "/comments",
                Some(json!({"id": id, "text": "still here?"})),
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }
}
