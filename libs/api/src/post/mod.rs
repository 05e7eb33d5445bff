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

use self::request::{CreatePostReq, ReplacePostReq};
use self::response::PostResp;

/// List all posts, newest first, with their comments oldest first
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "List all posts successfully", body = [PostResp]),
        (status = 500, description = "Database not configured or schema missing", body = ErrorResp)
    )
)]
pub async fn get_posts(
    State(state): State<ApiState>,
) -> ApiResponse<Json<Vec<PostResp>>> {
    let posts = state
        .repo()?
        .post
        .find_all()
        .await
        .into_response("list posts")?;

    Ok(Json(posts.into_iter().map(PostResp::from).collect()))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostReq,
    responses(
        (status = 201, description = "Create a post successfully", body = PostResp),
        (status = 400, description = "Title is missing", body = ErrorResp)
    )
)]
pub async fn create_post(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<CreatePostReq>,
) -> ApiResponse<(StatusCode, Json<PostResp>)> {
    let Some(title) = trimmed(body.title) else {
        return Err(ApiError::ClientError("Title is required".to_string()));
    };

    let post = state
        .repo()?
        .post
        .create(title, body.description.unwrap_or_default())
        .await
        .into_response("create post")?;

    info!(task = "create post", id = post.id);

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Replace the title and description of a post
#[utoipa::path(
    put,
    path = "/posts",
    request_body = ReplacePostReq,
    responses(
        (status = 200, description = "Replace a post successfully", body = PostResp),
        (status = 400, description = "Id or title is missing", body = ErrorResp),
        (status = 403, description = "Demo posts cannot be edited", body = ErrorResp),
        (status = 404, description = "Post not found", body = ErrorResp)
    )
)]
pub async fn replace_post(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<ReplacePostReq>,
) -> ApiResponse<Json<PostResp>> {
    let Some(id) = body.id else {
        return Err(ApiError::ClientError("Post ID is required".to_string()));
    };
    let Some(title) = trimmed(body.title) else {
        return Err(ApiError::ClientError("Title is required".to_string()));
    };

    let outcome = state
        .repo()?
        .post
        .replace(id, title, body.description.unwrap_or_default())
        .await
        .into_response("replace post")?;

    match outcome {
        Outcome::Done(post) => {
            info!(task = "replace post", id);
            Ok(Json(post.into()))
        }
        Outcome::NotFound => {
            Err(ApiError::NotFound("Post not found".to_string()))
        }
        Outcome::Demo => Err(ApiError::Forbidden(
            "Demo posts cannot be edited".to_string(),
        )),
    }
}

/// Delete a post and its comments
#[utoipa::path(
    delete,
    path = "/posts",
    params(IdParam),
    responses(
        (status = 200, description = "Delete a post successfully", body = MessageResp),
        (status = 400, description = "Id is missing", body = ErrorResp),
        (status = 403, description = "Demo posts cannot be deleted", body = ErrorResp),
        (status = 404, description = "Post not found", body = ErrorResp)
    )
)]
pub async fn delete_post(
    State(state): State<ApiState>,
    Query(params): Query<IdParam>,
) -> ApiResponse<Json<MessageResp>> {
    let id = parse_id(params.id, "Post ID is required")?;

    let outcome = state
        .repo()?
        .post
        .delete(id)
        .await
        .into_response("delete post")?;

    match outcome {
        Outcome::Done(()) => {
            info!(task = "delete post", id);
            Ok(MessageResp::new("Post deleted successfully"))
        }
        Outcome::NotFound => {
            Err(ApiError::NotFound("Post not found".to_string()))
        }
        Outcome::Demo => Err(ApiError::Forbidden(
            "Demo posts cannot be deleted".to_string(),
        )),
    }
}
