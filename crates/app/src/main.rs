use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studio_app::background::{chat_responder, dashboard_refresh, inbox_refresh};
use studio_app::channel::WhatsAppLink;
use studio_app::config::AppConfig;
use studio_app::services::auth;
use studio_app::state::AppState;
use studio_core::clock::SystemClock;
use studio_events::EventBus;
use studio_store::FileStore;

const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_app=debug,studio_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `studio-app hash-password <password>` prints a value for ADMIN_PASSWORD_HASH.
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let password = args.next().ok_or("usage: studio-app hash-password <password>")?;
        let hash = auth::hash_password(&password).map_err(|e| e.to_string())?;
        println!("{hash}");
        return Ok(());
    }

    // --- Configuration ---
    let config = AppConfig::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        utc_offset_hours = config.utc_offset_hours,
        admin_login = config.admin_password_hash.is_some(),
        "Loaded configuration"
    );
    if config.admin_password_hash.is_none() {
        tracing::warn!("ADMIN_PASSWORD_HASH is not set, admin login is disabled");
    }

    // --- Store ---
    let store = FileStore::open(&config.data_dir)?;
    tracing::info!(dir = %store.dir().display(), "File store opened");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // --- App state ---
    let state = AppState::new(
        Arc::new(store),
        Arc::new(config),
        Arc::clone(&event_bus),
        Arc::new(SystemClock),
        Arc::new(WhatsAppLink),
    );

    // --- Background tasks ---
    let cancel = CancellationToken::new();

    let (dashboard_tx, mut dashboard_rx) = watch::channel(None);
    let dashboard_handle = tokio::spawn(dashboard_refresh::run(
        state.clone(),
        event_bus.subscribe(),
        cancel.clone(),
        dashboard_tx,
    ));

    let (inbox_tx, inbox_rx) = watch::channel(None);
    let inbox_handle = tokio::spawn(inbox_refresh::run(
        state.clone(),
        event_bus.subscribe(),
        cancel.clone(),
        inbox_tx,
    ));

    let responder_handle = tokio::spawn(chat_responder::run(
        state.clone(),
        event_bus.subscribe(),
        cancel.clone(),
    ));

    let summary_cancel = cancel.clone();
    let summary_handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = summary_cancel.cancelled() => break,
                changed = dashboard_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if let Some(snapshot) = dashboard_rx.borrow_and_update().as_ref() {
                        tracing::info!(
                            bookings = snapshot.stats.total_bookings,
                            pending = snapshot.stats.pending_bookings,
                            revenue = %snapshot.stats.revenue_label(),
                            unread_messages = snapshot.stats.unread_messages,
                            conversations = inbox_rx.borrow().as_ref().map_or(0, Vec::len),
                            "Dashboard"
                        );
                    }
                }
            }
        }
    });

    tracing::info!("Studio workspace running, press Ctrl-C to stop");
    shutdown_signal().await;

    // --- Shutdown ---
    cancel.cancel();
    for (name, handle) in [
        ("dashboard_refresh", dashboard_handle),
        ("inbox_refresh", inbox_handle),
        ("chat_responder", responder_handle),
        ("dashboard_summary", summary_handle),
    ] {
        if tokio::time::timeout(DRAIN_TIMEOUT, handle).await.is_err() {
            tracing::warn!(task = name, "Task did not stop in time");
        }
    }
    drop(state);
    drop(event_bus);

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
