//! forumpush server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use apalis::prelude::*;
use axum::Router;
use forumpush_api::{AppState, router as api_router};
use forumpush_common::Config;
use forumpush_core::{
    DbRecipientDirectory, FilterChain, JobQueue, NotificationDispatcher, OnesignalClient,
    OnesignalSubscriptionService, PushDispatcher, RecipientDirectory, SuppressedTypesFilter,
};
use forumpush_db::repositories::{ForumUserRepository, OnesignalSubscriptionRepository};
use forumpush_queue::RedisJobQueue;
use forumpush_queue::workers::{OnesignalContext, onesignal_worker};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forumpush=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting forumpush server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = Arc::new(forumpush_db::init(&config).await?);
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    forumpush_db::migrate(&db).await?;
    info!("Migrations completed");

    // Connect to Redis and initialize job queue
    info!("Connecting to Redis...");
    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;
    let job_queue = RedisJobQueue::new(redis_conn);
    info!("Connected to Redis job queue");

    // Dispatch gate
    let directory: Arc<dyn RecipientDirectory> =
        Arc::new(DbRecipientDirectory::new(Arc::clone(&db)));
    let queue: Arc<dyn JobQueue> = Arc::new(job_queue.clone());
    let filters = FilterChain::new().with(SuppressedTypesFilter::new(
        config.push.suppressed_notification_types.iter().copied(),
    ));
    let dispatcher: Arc<dyn NotificationDispatcher> = Arc::new(PushDispatcher::new(
        config.push.clone(),
        filters,
        Arc::clone(&directory),
        queue,
    ));

    let state = AppState {
        dispatcher,
        directory,
        onesignal_subscriptions: OnesignalSubscriptionService::new(
            ForumUserRepository::new(Arc::clone(&db)),
            OnesignalSubscriptionRepository::new(Arc::clone(&db)),
        ),
    };

    // Build router
    let app = Router::new()
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start OneSignal delivery worker
    info!("Starting OneSignal delivery worker...");
    let onesignal_ctx = OnesignalContext::new(OnesignalClient::new(&config.push, &config.onesignal)?);
    let onesignal_storage = job_queue.onesignal_storage();

    // Spawn the worker in the background
    tokio::spawn(async move {
        let monitor = Monitor::new().register({
            WorkerBuilder::new("onesignal")
                .data(onesignal_ctx)
                .backend(onesignal_storage)
                .build_fn(onesignal_worker)
        });

        if let Err(e) = monitor.run().await {
            tracing::error!(error = %e, "OneSignal worker failed");
        }
    });
    info!("OneSignal delivery worker started");

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
