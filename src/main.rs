use api::{init_config, ApiState};
use repository::Repository;
use shuttle_runtime::{Error, SecretStore, Secrets};

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
    #[shuttle_shared_db::Postgres(local_uri = "{secrets.LOCAL_DATABASE_URL}")]
    conn_string: String,
) -> shuttle_axum::ShuttleAxum {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = secret_store
        .get("CONFIG")
        .unwrap_or_else(|| ".toml".to_string());
    let config = util::load_config(&format!("Config{}", config))
        .and_then(|config| init_config(&config))
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let repository = Repository::new(&conn_string, &config.database)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let router = api::serve(ApiState::new(Some(repository), Some(conn_string)));

    Ok(router.into())
}
