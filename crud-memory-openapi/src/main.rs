mod config;

mod app;
mod ctx;
mod errors;
mod notes;
mod openapi;
mod state;
mod store;

use std::net::SocketAddr;

use aide::axum::ApiRouter;
use app::AppParams;
pub use config::config;
pub use errors::{Error, Result};
pub use store::{init_store, NoteStore};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = config();

    setup_tracing(config.log_json);

    let store = init_store().await?;

    let (app, _) = app::create(AppParams {
        store,
        router: |state| ApiRouter::new().merge(notes::router(state)),
    })
    .await?;

    let port = config.port;
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn setup_tracing(json: bool) {
    let tracing = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "crud_memory_openapi=debug,tower_http=debug,axum::rejection=trace".into()),
    );

    if json {
        tracing.with(tracing_subscriber::fmt::layer().json()).try_init().ok();
    } else {
        tracing
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_file(true)
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_target(false),
            )
            .try_init()
            .ok();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to listen for SIGTERM: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
