//! # Session Timer Bot Main Entry Point
//!
//! Initializes logging, loads configuration, registers the Telegram webhook,
//! starts the timer scheduler, and serves the webhook and health endpoints.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_timer_bot::bot::handlers::BotHandler;
use session_timer_bot::config::Config;
use session_timer_bot::services::health::HealthService;
use session_timer_bot::services::notifier::{Notifier, TelegramNotifier};
use session_timer_bot::services::registry::SessionRegistry;
use session_timer_bot::services::reminder::ReminderScheduler;
use session_timer_bot::services::timer::CronTimer;
use session_timer_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_timer_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Session Timer Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Webhook: {}, HTTP Port: {}, Reminders at {} and {} minutes left",
        config.webhook_url,
        config.http_port,
        config.reminder_policy.first_minutes_left(),
        config.reminder_policy.second_minutes_left()
    );

    let bot = Bot::new(&config.telegram_bot_token);

    info!("Initializing timer scheduler...");
    let timer = CronTimer::new().await.context("Failed to create timer scheduler")?;
    timer.start().await.context("Failed to start timer scheduler")?;

    let registry = Arc::new(SessionRegistry::new());
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(bot.clone()));
    let scheduler = Arc::new(
        ReminderScheduler::new(
            registry.clone(),
            notifier,
            Arc::new(timer.clone()),
            config.reminder_policy,
        )
        .with_session_end_notice(config.session_end_notice),
    );
    let handler = BotHandler::new(scheduler);

    // Registers the webhook with Telegram and yields the route it posts to
    let address = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let options = webhooks::Options::new(address, config.webhook_url.clone());
    let (update_listener, stop_flag, webhook_router) = webhooks::axum_to_router(bot.clone(), options)
        .await
        .context("Failed to register webhook")?;
    log_system_event("webhook registered", Some(config.webhook_url.as_str()));

    let health_service = HealthService::new(registry);
    let app = webhook_router
        .merge(health_service.router)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind to port {}", config.http_port))?;
    info!("HTTP server listening on {}", address);

    let server_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(stop_flag).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    Dispatcher::builder(bot, handler.schema())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            update_listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    if let Err(e) = server_task.await {
        tracing::error!("HTTP server task error: {}", e);
    }

    // Pending reminders are dropped with the process
    if let Err(e) = timer.stop().await {
        tracing::warn!("Error stopping timer scheduler: {}", e);
    }

    log_system_event("application stopped", None);
    Ok(())
}
