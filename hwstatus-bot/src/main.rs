//! hwstatus bot
//!
//! Polls the homework statuses API on a fixed interval and reports review
//! status changes to a Telegram chat.
//!
//! Architecture:
//! - Configuration: credentials and knobs from the environment
//! - Client: one bounded GET per cycle against the statuses endpoint
//! - Notifier: Telegram Bot API delivery
//! - Watcher: the cycle loop that owns the cursor
//!
//! The loop never terminates on its own: only startup misconfiguration is
//! fatal, everything after that is logged and retried on the next cycle.

mod api;
mod config;
mod notify;
mod watcher;

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::notify::TelegramNotifier;
use crate::watcher::StatusWatcher;
use hwstatus_client::HomeworkClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hwstatus_bot=info,hwstatus_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    info!("Starting homework status bot");

    // Missing credentials are the one fatal failure: name them all and exit.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration check failed: {e}");
            anyhow::bail!("configuration check failed: {e}");
        }
    };

    info!(
        endpoint = %config.endpoint,
        interval = ?config.poll_interval,
        start_from = config.start_from,
        "configuration loaded"
    );

    let client = HomeworkClient::new(config.endpoint.clone(), config.practicum_token.clone());
    let notifier = TelegramNotifier::new(
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
    );

    let mut watcher = StatusWatcher::new(
        Arc::new(client),
        Arc::new(notifier),
        config.poll_interval,
        config.start_from,
    );

    // Runs until the process is terminated externally.
    watcher.run().await;

    Ok(())
}
