use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use repository::{DatabaseOptions, Repository};
use toml::{map::Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod comment;
pub mod diagnostic;
pub mod healthz;
pub mod not_found;
pub mod post;
mod request;
mod response;

pub use response::{ErrorResp, MessageResp};

#[derive(Debug)]
pub enum ApiError {
    ClientError(String),
    NotFound(String),
    Forbidden(String),
    MethodNotAllowed,
    NotConfigured,
    SchemaMissing(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    repo: Option<Repository>,
    database_url: Option<String>,
}

impl ApiState {
    pub fn new(repo: Option<Repository>, database_url: Option<String>) -> Self {
        Self { repo, database_url }
    }

    fn repo(&self) -> Result<&Repository, ApiError> {
        self.repo.as_ref().ok_or(ApiError::NotConfigured)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseOptions,
}

pub fn init_config(config: &Map<String, Value>) -> anyhow::Result<Config> {
    let server = util::table(config, "server")?;
    let database = util::table(config, "database")?;

    Ok(Config {
        port: u16::try_from(util::integer(server, "port")?)?,
        database: DatabaseOptions {
            max_connections: u32::try_from(util::integer(
                database,
                "max_connections",
            )?)?,
            min_connections: u32::try_from(util::integer(
                database,
                "min_connections",
            )?)?,
            run_migrations: util::boolean(database, "run_migrations")?,
        },
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        post::get_posts,
        post::create_post,
        post::replace_post,
        post::delete_post,
        comment::create_comment,
        comment::replace_comment,
        comment::delete_comment,
        diagnostic::get_diagnostic,
    ),
    components(schemas(
        post::request::CreatePostReq,
        post::request::ReplacePostReq,
        post::response::PostResp,
        comment::request::CreateCommentReq,
        comment::request::ReplaceCommentReq,
        comment::response::CommentResp,
        diagnostic::response::DiagnosticResp,
        diagnostic::response::DatabaseReport,
        MessageResp,
        ErrorResp,
    )),
    tags(
        (name = "noticeboard", description = "Posts and comments API")
    )
)]
struct ApiDoc;

pub fn serve(state: ApiState) -> Router {
    info!(
        task = "start api serving",
        configured = state.repo.is_some()
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    // posts
    let posts = get(post::get_posts)
        .post(post::create_post)
        .put(post::replace_post)
        .delete(post::delete_post)
        .options(not_found::preflight)
        .fallback(not_found::method_not_allowed);

    // comments
    let comments = post(comment::create_comment)
        .put(comment::replace_comment)
        .delete(comment::delete_comment)
        .options(not_found::preflight)
        .fallback(not_found::method_not_allowed);

    // diagnostic
    let diagnostic = get(diagnostic::get_diagnostic)
        .options(not_found::preflight)
        .fallback(not_found::method_not_allowed);

    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .route("/healthz", get(healthz::get_health))
        .route("/posts", posts)
        .route("/comments", comments)
        .route("/diagnostic", diagnostic)
        .fallback(not_found::get_404)
        .layer(cors)
        .with_state(state)
}
