//! HTTP listener and connection lifecycle.
//!
//! Connections are served by hyper directly so that HTTP/1 can enforce a
//! read-header timeout. On cancellation the listener is closed, in-flight
//! connections get `shutdown_timeout` to finish, and anything still open
//! afterwards is dropped.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use calc_logging::Logger;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::api::rest;
use crate::config::ServerConfig;
use crate::domain::Service;

/// Pause after a failed `accept`, e.g. when the process is out of file descriptors.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// A bound, not yet serving, HTTP server.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
    read_header_timeout: Duration,
    shutdown_timeout: Duration,
}

impl Server {
    /// Bind the configured address. Port 0 picks an ephemeral port; see
    /// [`Server::local_addr`].
    ///
    /// # Errors
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub async fn bind(config: &ServerConfig, router: Router) -> Result<Self, ServerError> {
        let addr = config.bind_addr();
        let bind_err = |source| ServerError::Bind { addr, source };

        let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        Ok(Self {
            listener,
            local_addr,
            router,
            read_header_timeout: config.read_header_timeout,
            shutdown_timeout: config.shutdown_timeout,
        })
    }

    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until `cancel` fires, then drain.
    pub async fn serve(self, cancel: CancellationToken) {
        let Self {
            listener,
            local_addr,
            router,
            read_header_timeout,
            shutdown_timeout,
        } = self;

        let mut builder = Builder::new(TokioExecutor::new());
        builder
            .http1()
            .timer(TokioTimer::new())
            .header_read_timeout(read_header_timeout);
        let graceful = GracefulShutdown::new();

        tracing::info!(addr = %local_addr, "Starting server");

        loop {
            let (stream, peer) = tokio::select! {
                () = cancel.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to accept connection");
                        if backoff_after_accept_error(&cancel).await {
                            continue;
                        }
                        break;
                    }
                },
            };

            let service = TowerToHyperService::new(router.clone());
            let conn = builder
                .serve_connection_with_upgrades(TokioIo::new(stream), service)
                .into_owned();
            let conn = graceful.watch(conn);

            tokio::spawn(async move {
                if let Err(e) = conn.await {
                    tracing::debug!(%peer, error = %e, "connection closed with error");
                }
            });
        }

        drop(listener);
        tracing::info!("Shutting down server...");

        if tokio::time::timeout(shutdown_timeout, graceful.shutdown())
            .await
            .is_err()
        {
            tracing::warn!(
                timeout = ?shutdown_timeout,
                "Drain timeout elapsed, dropping open connections"
            );
        }
        tracing::info!("Server stopped");
    }
}

/// Returns `false` if `cancel` fired during the pause.
async fn backoff_after_accept_error(cancel: &CancellationToken) -> bool {
    tokio::select! {
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(ACCEPT_ERROR_BACKOFF) => true,
    }
}

/// Build the service stack for `config` and bind it.
///
/// # Errors
/// Returns [`ServerError::Bind`] if the address cannot be bound.
pub async fn bind(config: &ServerConfig, log: &Logger) -> Result<Server, ServerError> {
    let service = Arc::new(Service::new(log));
    let router = rest::router(service, config.max_body_bytes);
    Server::bind(config, router).await
}

/// Serve `config` until SIGINT or SIGTERM, then drain and return.
///
/// # Errors
/// Returns [`ServerError::Bind`] if the address cannot be bound.
pub async fn run(config: &ServerConfig, log: &Logger) -> Result<(), ServerError> {
    let cancel = CancellationToken::new();
    match shutdown_signal() {
        Ok(signal) => {
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                signal.await;
                on_signal.cancel();
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install signal handlers, server can only be killed");
        }
    }

    let server = bind(config, log).await?;
    server.serve(cancel).await;
    Ok(())
}

/// Install SIGINT and SIGTERM handlers. The returned future resolves on the
/// first of them.
///
/// # Errors
/// Returns the I/O error if a handler cannot be installed.
#[cfg(unix)]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = ()> + Send> {
    use signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    Ok(async move {
        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        tracing::info!(signal = name, "Shutdown signal received, initiating graceful shutdown");
    })
}

/// Install the Ctrl+C handler. The returned future resolves when it fires.
///
/// # Errors
/// Never fails on this platform; the signature matches the unix variant.
#[cfg(not(unix))]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = ()> + Send> {
    Ok(async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(%e, "Error handling Ctrl+C signal");
            std::future::pending::<()>().await;
        }
        tracing::info!(signal = "Ctrl+C", "Shutdown signal received, initiating graceful shutdown");
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn accept_error_pauses_before_retry() {
        let cancel = CancellationToken::new();
        let started = tokio::time::Instant::now();

        assert!(backoff_after_accept_error(&cancel).await);
        assert!(started.elapsed() >= ACCEPT_ERROR_BACKOFF);
    }

    #[tokio::test(start_paused = true)]
    async fn accept_error_pause_ends_on_cancel() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let started = tokio::time::Instant::now();

        assert!(!backoff_after_accept_error(&cancel).await);
        assert!(started.elapsed() < ACCEPT_ERROR_BACKOFF);
    }
}
