// Main entry point - Dependency injection and the refresh loop
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{sync::Arc, time::Duration};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::application::bankers_service::BankersService;
use crate::application::clients_service::ClientsService;
use crate::application::overview_service::OverviewService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_repository::HttpDashboardRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::console::render;
use crate::presentation::refresh::SingleFlight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wealth_dashboard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    tracing::info!("Using backend at {}", config.api.base_url);

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpDashboardRepository::new(
        config.api.base_url.clone(),
        config.api.timeout_secs.map(Duration::from_secs),
        config.api.cache_ttl_secs.map(Duration::from_secs),
    )?);

    // Create services (application layer)
    let overview_service = OverviewService::new(repository.clone(), config.display.currency_scale());
    let clients_service = ClientsService::new(repository.clone(), config.cohort.reference_date.clone());
    let bankers_service = BankersService::new(repository);

    let state = AppState::new(
        overview_service,
        clients_service,
        bankers_service,
        config.clients.clone(),
        config.bankers.selected.clone(),
    );

    state.refresh().await;
    render(&state).await?;

    let Some(secs) = config.refresh_secs.filter(|s| *s > 0) else {
        return Ok(());
    };

    tracing::info!("Refreshing every {}s, Ctrl-C to stop", secs);
    let mut interval = tokio::time::interval(Duration::from_secs(secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // the first tick completes immediately
    interval.tick().await;
    let mut flight = SingleFlight::default();
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let state = state.clone();
                flight.spawn(async move {
                    state.refresh().await;
                    if let Err(e) = render(&state).await {
                        tracing::error!("Error rendering dashboard: {}", e);
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                return Ok(());
            }
        }
    }
}
