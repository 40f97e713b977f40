//! Deliberation event processor entry point.

use std::error::Error;
use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use deliberation_events::adapters::{
    InMemoryEventStore, LoggingPushNotificationSender, StaticUserDirectory,
};
use deliberation_events::application::{
    EventProcessor, EventProcessorConfig, HandlerRegistry, TalkSessionPushNotificationHandler,
};
use deliberation_events::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load_validated()?;

    init_tracing(&config.server);

    tracing::info!(
        environment = ?config.server.environment,
        "Starting deliberation event processor"
    );

    let event_store = Arc::new(InMemoryEventStore::new());
    let registry = Arc::new(HandlerRegistry::new());

    let mut push_handler = TalkSessionPushNotificationHandler::new(
        Arc::new(LoggingPushNotificationSender::new()),
        Arc::new(StaticUserDirectory::default()),
    );
    if let Some(operator) = config.notifications.operator_organization()? {
        push_handler = push_handler.with_operator_organization(operator);
    }
    registry.register_all(
        &TalkSessionPushNotificationHandler::event_types(),
        Arc::new(push_handler),
    );

    let processor_config = EventProcessorConfig::default()
        .with_poll_interval(config.processor.poll_interval())
        .with_batch_size(config.processor.batch_size)
        .with_handler_timeout(config.processor.handler_timeout());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let processor = EventProcessor::with_config(event_store, registry, processor_config);
    let processor_task = processor.spawn(shutdown_rx);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    // The receiver may already be gone if the processor task panicked.
    let _ = shutdown_tx.send(true);
    processor_task.await?;

    tracing::info!("Event processor stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}
