use axum::{extract::State, http::StatusCode, Json};
use repository::{diagnostic::REQUIRED_TABLES, Repository};
use tracing::{error, info};

pub mod response;

use crate::ApiState;

use self::response::{DatabaseReport, DiagnosticResp};

const SCHEMES: [&str; 3] = ["postgres://", "postgresql://", "sqlite:"];

/// Check the database connection and schema
#[utoipa::path(
    get,
    path = "/diagnostic",
    responses(
        (status = 200, description = "Database is reachable", body = DiagnosticResp),
        (status = 500, description = "Database is not configured or unreachable", body = DiagnosticResp)
    )
)]
pub async fn get_diagnostic(
    State(state): State<ApiState>,
) -> (StatusCode, Json<DiagnosticResp>) {
    let report = match check_url(state.database_url.as_deref()) {
        Err(report) => report,
        Ok(()) => match &state.repo {
            Some(repo) => inspect(repo).await,
            None => connection_failed(
                "The server holds no connection pool; check the startup logs."
                    .to_string(),
            ),
        },
    };

    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(report))
}

fn check_url(url: Option<&str>) -> Result<(), DiagnosticResp> {
    let Some(url) = url else {
        return Err(DiagnosticResp {
            error: Some("DATABASE_URL not configured".to_string()),
            message: "The DATABASE_URL environment variable is not set."
                .to_string(),
            fix: Some(
                "Add DATABASE_URL to the environment or the secrets file."
                    .to_string(),
            ),
            ..Default::default()
        });
    };

    if SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        return Ok(());
    }

    let prefix: String = url.chars().take(20).collect();
    Err(DiagnosticResp {
        error: Some("Invalid connection string format".to_string()),
        message: format!(
            "DATABASE_URL should start with one of {} but it starts with: {prefix}...",
            SCHEMES.join(", ")
        ),
        fix: Some(
            "Copy the full connection string from your database provider, \
             not a psql command line."
                .to_string(),
        ),
        ..Default::default()
    })
}

async fn inspect(repo: &Repository) -> DiagnosticResp {
    let info = match repo.diagnostic.server_info().await {
        Ok(info) => info,
        Err(e) => {
            error!(task = "diagnostic", error = e.to_string());
            return connection_failed(e.to_string());
        }
    };

    let tables_found = match repo.diagnostic.existing_tables().await {
        Ok(tables) => tables,
        Err(e) => {
            error!(task = "diagnostic", error = e.to_string());
            return connection_failed(e.to_string());
        }
    };
    let tables_exist = REQUIRED_TABLES
        .iter()
        .all(|table| tables_found.iter().any(|found| found == table));

    // The post table may not exist yet.
    let posts_count = repo.diagnostic.count_posts().await.unwrap_or(0);

    info!(task = "diagnostic", tables_exist, posts_count);

    DiagnosticResp {
        success: true,
        message: "Database connection successful!".to_string(),
        recommendations: Some(recommend(tables_exist, posts_count).to_string()),
        database: Some(DatabaseReport {
            connected: true,
            timestamp: info.now,
            version: info.version,
            tables_exist,
            tables_found,
            posts_count,
        }),
        ..Default::default()
    }
}

fn recommend(tables_exist: bool, posts_count: u64) -> &'static str {
    match (tables_exist, posts_count) {
        (false, _) => {
            "Tables do not exist. Enable database.run_migrations in the config \
             and restart the server to create them."
        }
        (true, 0) => {
            "Tables exist but no posts found. Run the migrations again to add \
             the demo posts."
        }
        (true, _) => {
            "Everything looks good! Your database is connected and has posts."
        }
    }
}

fn connection_failed(message: String) -> DiagnosticResp {
    DiagnosticResp {
        error: Some("Database connection failed".to_string()),
        message,
        troubleshooting: vec![
            format!(
                "Verify DATABASE_URL is set correctly (should start with one of {})",
                SCHEMES.join(", ")
            ),
            "Check that the database server is running and accepts connections"
                .to_string(),
            "Verify the credentials and database name in the connection string"
                .to_string(),
            "Check the server logs for more details".to_string(),
        ],
        ..Default::default()
    }
}
