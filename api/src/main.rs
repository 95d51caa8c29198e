use anyhow::Result;
use dotenv::dotenv;
use std::net::SocketAddr;

use api::config::ApiConfig;
use api::observability::Observability;
use api::state::AppState;
use campus_validation::schemas::catalog;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    let obs = Observability::init(&config)?;

    let schemas = catalog::verify();
    tracing::info!("{} endpoint schemas verified", schemas);

    let app = api::app(AppState::new(config, obs.registry));

    let addr = SocketAddr::from(([0, 0, 0, 0], 3001));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
