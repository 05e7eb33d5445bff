use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait,
    PaginatorTrait, Statement,
};

use crate::active_models::prelude::*;
use crate::response::{IntoResponse, Response};

pub const REQUIRED_TABLES: [&str; 2] = ["comment", "post"];

/// Answer to the trivial connectivity query.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerInfo {
    pub now: String,
    pub version: String,
}

#[derive(Clone, Debug)]
pub struct DiagnosticRepository {
    db: DatabaseConnection,
}

impl DiagnosticRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn server_info(&self) -> Response<ServerInfo> {
        let backend = self.db.get_database_backend();
        let sql = match backend {
            DatabaseBackend::Postgres => {
                "SELECT NOW()::text AS now, version() AS version"
            }
            DatabaseBackend::Sqlite => {
                "SELECT CAST(CURRENT_TIMESTAMP AS TEXT) AS now, \
                 sqlite_version() AS version"
            }
            DatabaseBackend::MySql => {
                "SELECT CAST(NOW() AS CHAR) AS now, version() AS version"
            }
        };

        let row = self
            .db
            .query_one(Statement::from_string(backend, sql))
            .await
            .into_response("in querying server info")?
            .into_response("in querying server info")?;

        let now = row
            .try_get::<String>("", "now")
            .into_response("in reading server time")?;
        let version = row
            .try_get::<String>("", "version")
            .into_response("in reading server version")?;

        Ok(ServerInfo {
            now,
            version: short_version(backend, &version),
        })
    }

    /// Names of the required tables that exist, sorted.
    pub async fn existing_tables(&self) -> Response<Vec<String>> {
        let backend = self.db.get_database_backend();
        let sql = match backend {
            DatabaseBackend::Postgres => {
                "SELECT table_name::text AS table_name \
                 FROM information_schema.tables \
                 WHERE table_schema = 'public' \
                 AND table_name IN ('comment', 'post') \
                 ORDER BY table_name"
            }
            DatabaseBackend::Sqlite => {
                "SELECT name AS table_name FROM sqlite_master \
                 WHERE type = 'table' AND name IN ('comment', 'post') \
                 ORDER BY name"
            }
            DatabaseBackend::MySql => {
                "SELECT table_name AS table_name \
                 FROM information_schema.tables \
                 WHERE table_schema = DATABASE() \
                 AND table_name IN ('comment', 'post') \
                 ORDER BY table_name"
            }
        };

        let rows = self
            .db
            .query_all(Statement::from_string(backend, sql))
            .await
            .into_response("in listing tables")?;

        rows.iter()
            .map(|row| {
                row.try_get::<String>("", "table_name")
                    .into_response("in reading a table name")
            })
            .collect()
    }

    pub async fn count_posts(&self) -> Response<u64> {
        Post::find()
            .count(&self.db)
            .await
            .into_response("in counting posts")
    }
}

// "PostgreSQL 16.2 on x86_64-pc-linux-gnu, ..." -> "PostgreSQL 16.2"
fn short_version(backend: DatabaseBackend, version: &str) -> String {
    match backend {
        DatabaseBackend::Postgres => {
            version.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
        }
        DatabaseBackend::Sqlite => format!("SQLite {version}"),
        DatabaseBackend::MySql => format!("MySQL {version}"),
    }
}
