use entity::prelude::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use response::{api_error, IntoResponse};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use toml::{map::Map, Value};
use tracing::debug;

mod response;

pub use reqwest::StatusCode;
pub use response::Response;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message}: {source}")]
    Request {
        message: String,
        source: reqwest::Error,
    },
    #[error("{message}: {source}")]
    Decode {
        message: String,
        source: serde_json::Error,
    },
    #[error("{message} (status {status})")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request { source, .. } => source.status(),
            ClientError::Decode { .. } => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub message: String,
    #[serde(default)]
    pub database: Option<DatabaseReport>,
    #[serde(default)]
    pub recommendations: Option<String>,
    #[serde(default)]
    pub fix: Option<String>,
    #[serde(default)]
    pub troubleshooting: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseReport {
    pub connected: bool,
    pub timestamp: String,
    pub version: String,
    pub tables_exist: bool,
    pub tables_found: Vec<String>,
    pub posts_count: u64,
}

#[derive(Deserialize, Debug)]
struct MessageBody {
    message: String,
}

#[derive(Serialize)]
struct PostBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i32>,
    title: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_id: Option<i32>,
    text: &'a str,
}

/// Thin wrapper over the `/posts`, `/comments` and `/diagnostic` endpoints.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Response<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .into_response("failed to build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Reads `client.base_url` from a parsed `Config*.toml`.
    pub fn from_config(config: &Map<String, Value>) -> anyhow::Result<Self> {
        let base_url = util::string(util::table(config, "client")?, "base_url")?;

        Ok(Self::new(&base_url)?)
    }

    pub async fn get_posts(&self) -> Response<Vec<PostEntity>> {
        self.send(Method::GET, "posts", None::<&()>, "Failed to fetch posts")
            .await
    }

    pub async fn create_post(
        &self,
        title: &str,
        description: &str,
    ) -> Response<PostEntity> {
        let body = PostBody {
            id: None,
            title,
            description,
        };

        self.send(Method::POST, "posts", Some(&body), "Failed to create post")
            .await
    }

    pub async fn update_post(
        &self,
        id: i32,
        title: &str,
        description: &str,
    ) -> Response<PostEntity> {
        let body = PostBody {
            id: Some(id),
            title,
            description,
        };

        self.send(Method::PUT, "posts", Some(&body), "Failed to update post")
            .await
    }

    pub async fn delete_post(&self, id: i32) -> Response<String> {
        let body: MessageBody = self
            .send(
                Method::DELETE,
                &format!("posts?id={id}"),
                None::<&()>,
                "Failed to delete post",
            )
            .await?;

        Ok(body.message)
    }

    pub async fn add_comment(
        &self,
        post_id: i32,
        text: &str,
    ) -> Response<CommentEntity> {
        let body = CommentBody {
            id: None,
            post_id: Some(post_id),
            text,
        };

        self.send(Method::POST, "comments", Some(&body), "Failed to add comment")
            .await
    }

    pub async fn update_comment(
        &self,
        id: i32,
        text: &str,
    ) -> Response<CommentEntity> {
        let body = CommentBody {
            id: Some(id),
            post_id: None,
            text,
        };

        self.send(
            Method::PUT,
            "comments",
            Some(&body),
            "Failed to update comment",
        )
        .await
    }

    pub async fn delete_comment(&self, id: i32) -> Response<String> {
        let body: MessageBody = self
            .send(
                Method::DELETE,
                &format!("comments?id={id}"),
                None::<&()>,
                "Failed to delete comment",
            )
            .await?;

        Ok(body.message)
    }

    /// A failing check answers 500 with a report, so both are decoded.
    pub async fn diagnose(&self) -> Response<DiagnosticReport> {
        let (status, text) =
            self.request(Method::GET, "diagnostic", None::<&()>).await?;

        if status.is_success() || status == StatusCode::INTERNAL_SERVER_ERROR {
            if let Ok(report) = serde_json::from_str(&text) {
                return Ok(report);
            }
        }

        Err(api_error(status, &text, "Failed to run diagnostic"))
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> Response<T> {
        let (status, text) = self.request(method, path, body).await?;

        if !status.is_success() {
            return Err(api_error(status, &text, fallback));
        }

        serde_json::from_str(&text).into_response("failed to decode response")
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Response<(StatusCode, String)> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(task = "client request", method = %method, url = %url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.into_response("failed to send")?;
        let status = response.status();
        let text = response.text().await.into_response("failed to get text")?;

        Ok((status, text))
    }
}
