//! Process wiring: load the policy, bind, serve, drain on shutdown.
//!
//! The policy is loaded before the listener is bound, so a missing or invalid
//! `cors.json` stops the process without ever opening a port.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::cli::Cli;
use crate::config;
use crate::engine::CorsEngine;
use crate::error::AppError;
use crate::routes::Routes;
use crate::service::CorsService;

/// Everything the entry point needs to start the server.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub addr: SocketAddr,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            addr: cli.addr,
        }
    }
}

/// Loads the policy, binds `settings.addr` and serves until Ctrl-C or SIGTERM.
pub async fn run(settings: Settings) -> Result<(), AppError> {
    let policy = config::load(&settings.config_path)?;
    let engine = Arc::new(CorsEngine::new(policy));

    let listener = TcpListener::bind(settings.addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: settings.addr,
            source,
        })?;

    serve(listener, engine, shutdown_signal()).await
}

/// Accepts connections on `listener` until `shutdown` resolves. Open
/// connections are then asked to close once their current request is answered,
/// which also ends idle keep-alive connections.
pub async fn serve<F>(
    listener: TcpListener,
    engine: Arc<CorsEngine>,
    shutdown: F,
) -> Result<(), AppError>
where
    F: Future<Output = ()>,
{
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "Server running on http://localhost:{}", local_addr.port());

    let graceful = GracefulShutdown::new();
    let mut tasks = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(connection) => connection,
                    Err(err) => {
                        error!(error = %err, "accept error");
                        continue;
                    }
                };

                let service = CorsService::new(Arc::clone(&engine), Routes);
                let io = TokioIo::new(stream);
                let connection = http1::Builder::new().serve_connection(io, service);
                let connection = graceful.watch(connection);

                tasks.spawn(async move {
                    if let Err(err) = connection.await {
                        error!(peer = %peer, error = %err, "connection error");
                    }
                });
            }

            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    graceful.shutdown().await;
    while tasks.join_next().await.is_some() {}

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
