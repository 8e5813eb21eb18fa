//! blogstream - follows the realtime event stream and logs what arrives.

use std::sync::Arc;

use blogstream::adapters::{ActivityLogger, ConnectionStatusIndicator};
use blogstream::application::RealtimeService;
use blogstream::config::AppConfig;
use blogstream::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.logging)?;

    let service = RealtimeService::from_config(&config.realtime)?;
    tracing::info!(
        endpoint = service.endpoint(),
        max_reconnect_attempts = config.realtime.max_reconnect_attempts,
        invalidate_blogs = config.features.invalidate_blogs,
        "Starting blogstream"
    );

    let logger = Arc::new(ActivityLogger::new());
    let _activity = Arc::clone(&logger).subscribe(service.bus());

    let status = Arc::new(ConnectionStatusIndicator::new(service.monitor()));
    let _last_event = Arc::clone(&status).subscribe(service.bus());
    let status_task = tokio::spawn({
        let status = Arc::clone(&status);
        async move {
            while let Some(state) = status.wait_for_change().await {
                tracing::info!(state = %state, label = status.status_label(), "Connection status");
            }
        }
    });

    service.connect();

    tokio::signal::ctrl_c().await?;
    tracing::info!(events = logger.seen(), "Shutting down");

    service.disconnect();
    drop(service);
    status_task.await?;

    Ok(())
}
