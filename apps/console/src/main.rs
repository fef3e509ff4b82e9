use std::sync::Arc;

use anyhow::bail;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_cell::BookingFlowService;
use shared_api::{ApiClient, CancellationToken};
use shared_config::AppConfig;

/// Walks the read-only half of the booking flow against the configured API:
/// search, detail, providers, availability. Nothing is booked.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!(
        "Stitch dentistry console, {} environment, API {}",
        config.environment, config.api_url
    );

    let api = Arc::new(ApiClient::new(&config));
    let cancel = CancellationToken::new();
    match api.check_health(&cancel).await {
        Ok(health) => info!("API reachable: {}", health.status),
        Err(error) => warn!("API health check failed: {}", error.user_message()),
    }

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dentist".to_string());
    let flow = BookingFlowService::new(Arc::clone(&api));

    flow.search(&query).await;
    let state = flow.state();
    let results = match state.search.data() {
        Some(results) => results,
        None => bail!(
            "search failed: {}",
            state.search.error().unwrap_or("no response")
        ),
    };
    info!("{} dentistries match \"{}\"", results.len(), query);

    let Some(first) = results.first() else {
        info!("No dentistries to explore");
        return Ok(());
    };
    info!("Selecting {} ({})", first.name, first.city);

    flow.select_dentistry(&first.id).await;
    let state = flow.state();
    let detail = match state.detail.data() {
        Some(detail) => detail,
        None => bail!(
            "detail failed: {}",
            state.detail.error().unwrap_or("no response")
        ),
    };
    info!(
        "{}: {} services, {} staff",
        detail.name,
        detail.services.len(),
        detail.staff.len()
    );

    let Some(service) = detail.services.first().cloned() else {
        info!("No services listed for {}", detail.name);
        return Ok(());
    };
    info!("Checking providers for {}", service.name);

    flow.select_service(&service.id).await;
    let state = flow.state();
    if let Some(notice) = &state.notice {
        info!("{}", notice);
        return Ok(());
    }
    let providers = match state.providers.data() {
        Some(providers) => providers,
        None => bail!(
            "providers failed: {}",
            state.providers.error().unwrap_or("no response")
        ),
    };

    let Some(provider) = providers.first().cloned() else {
        return Ok(());
    };
    info!("Checking availability for {} ({})", provider.name, provider.title);

    flow.select_provider(&provider.id).await;
    let state = flow.state();
    if let Some(notice) = &state.notice {
        info!("{}", notice);
        return Ok(());
    }
    if let Some(slots) = state.availability.data() {
        for slot in slots.iter().take(5) {
            info!("  slot: {}", slot.start.to_rfc3339());
        }
        info!("{} open slots in total", slots.len());
    } else if let Some(error) = state.availability.error() {
        bail!("availability failed: {}", error);
    }

    Ok(())
}
