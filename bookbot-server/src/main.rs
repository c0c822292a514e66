use std::sync::Arc;

use anyhow::Context as _;
use bookbot_core::records::{PgRecordStore, RecordStore};
use bookbot_core::{BotConfig, TelegramClient};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use bookbot_server::context::AppContext;
use bookbot_server::dispatch::UpdateDispatcher;
use bookbot_server::http::{self, HttpState};
use bookbot_server::state::MemoryConversationStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    // Init logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Load config — a missing or empty BOT_TOKEN is the one fatal condition
    let config = match BotConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to DB. A failure is non-fatal: the bot stays up and inserts
    // report failure until the process is restarted with a working database.
    let records = Arc::new(PgRecordStore::connect(&config.database).await);

    let telegram = TelegramClient::with_base_url(
        config.telegram.token.clone(),
        config.telegram.api_url.clone(),
    )?;

    // Register the delivery endpoint before accepting traffic. A rejected
    // token surfaces here, before any event loop starts.
    let webhook_url = config.webhook.url();
    telegram
        .set_webhook(&webhook_url)
        .await
        .context("Failed to register webhook — check BOT_TOKEN and PUBLIC_URL")?;
    tracing::info!("Webhook registered at {}", webhook_url);

    let ctx = Arc::new(AppContext {
        config,
        telegram: telegram.clone(),
        records: records.clone(),
        conversations: Arc::new(MemoryConversationStore::new()),
    });
    let dispatcher = Arc::new(UpdateDispatcher::new(Arc::clone(&ctx)));

    let (tx, rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    http::start_server(HttpState { ctx, dispatcher }, rx).await?;

    tracing::warn!("Shutting down...");
    if let Err(e) = telegram.delete_webhook().await {
        tracing::warn!(error = %e, "Failed to deregister webhook");
    }
    records.close().await;
    tracing::warn!("Bot stopped");

    Ok(())
}
