use std::sync::OnceLock;

use comment::CommentRepository;
use diagnostic::DiagnosticRepository;
use migration::Migrator;
use migration::MigratorTrait;
use post::PostRepository;
use regex::Regex;
use response::{IntoResponse, Response};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

mod active_models;
pub mod comment;
pub mod diagnostic;
pub mod post;
mod response;

pub use migration::WELCOME_TITLE;

#[derive(Clone, Debug)]
pub struct Repository {
    pub post: PostRepository,
    pub comment: CommentRepository,
    pub diagnostic: DiagnosticRepository,
}

#[derive(Clone, Debug)]
pub struct DatabaseOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            run_migrations: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },
    #[error("no row returned {}", message)]
    NoRow { message: String },
}

impl RepositoryError {
    /// True when the database answered but the tables are not there yet.
    pub fn is_schema_missing(&self) -> bool {
        static PATTERN: OnceLock<Regex> = OnceLock::new();

        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r#"(?i)relation "[^"]+" does not exist|no such table"#)
                .expect("schema-missing pattern compiles")
        });

        match self {
            RepositoryError::InSeaOrmDbErr { source, .. } => {
                pattern.is_match(&source.to_string())
            }
            RepositoryError::NoRow { .. } => false,
        }
    }
}

/// Result of a write that is refused for missing or read-only rows.
#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    NotFound,
    Demo,
}

impl Repository {
    pub async fn new(db_url: &str, options: &DatabaseOptions) -> Response<Self> {
        let db = init_db(db_url, options).await?;

        Ok(Self::from_connection(db))
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            post: PostRepository::new(db.clone()),
            comment: CommentRepository::new(db.clone()),
            diagnostic: DiagnosticRepository::new(db),
        }
    }
}

async fn init_db(
    db_url: &str,
    options: &DatabaseOptions,
) -> Response<DatabaseConnection> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(options.max_connections)
        .min_connections(options.min_connections)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    if options.run_migrations {
        Migrator::up(&db, None)
            .await
            .into_response("in migrator up")?;
        info!(task = "migrations applied");
    }

    Ok(db)
}
