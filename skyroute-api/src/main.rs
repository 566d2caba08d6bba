use anyhow::Context;
use skyroute_api::{app, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skyroute_api=debug,skyroute_store=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skyroute_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Skyroute API on port {}", config.server.port);

    let search_defaults = config.search.to_options();
    search_defaults
        .validate()
        .context("Configured search defaults are out of range")?;

    let offers = skyroute_store::build_offer_source(&config.offers)
        .await
        .context("Failed to initialise flight offer source")?;

    let app = app(AppState::new(offers, search_defaults));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
