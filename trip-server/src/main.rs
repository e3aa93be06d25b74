use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use trip_server::config::Credentials;
use trip_server::geocode::Gazetteer;
use trip_server::planner::{ItineraryPipeline, PipelineConfig, ProviderRegistry};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_server=info,tower_http=info")),
        )
        .init();

    let credentials = Credentials::from_env();
    let config = PipelineConfig::default();
    let registry = ProviderRegistry::from_credentials(&credentials, &config);
    tracing::info!(modes = ?registry.modes(), "live providers registered");

    let pipeline = ItineraryPipeline::new(registry, config);
    let state = AppState::new(pipeline, Arc::new(Gazetteer::korea()));
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "trip planner listening");

    axum::serve(listener, app).await?;
    Ok(())
}
