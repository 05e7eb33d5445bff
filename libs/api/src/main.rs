use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::{init_config, serve, ApiState};
use repository::Repository;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secrets = util::load_env("Secrets.dev.toml")?;
    let config = util::secret(&secrets, "CONFIG")
        .unwrap_or_else(|| ".toml".to_string());
    let config_name = &format!("Config{}", config);
    let config = init_config(&util::load_config(config_name)?)?;

    let database_url = util::secret(&secrets, "DATABASE_URL");
    let repository = match &database_url {
        Some(url) => Some(
            Repository::new(url, &config.database)
                .await
                .context("failed to connect to DATABASE_URL")?,
        ),
        None => {
            warn!(task = "startup", "DATABASE_URL is not set");
            None
        }
    };

    let router = serve(ApiState::new(repository, database_url));

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(&address).await?;
    info!(task = "listen", port = config.port);

    Ok(axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?)
}
