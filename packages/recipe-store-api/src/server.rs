//! Hyper server setup and request handling.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming as IncomingBody};
use hyper::{Request, Response, Result as HyperResult};
use hyper_util::rt::TokioExecutor;
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::router::Router;

/// Pause after an accept failure that is not tied to a single peer.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// HTTP server for the recipe API.
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
}

impl Server {
    /// Binds the listening socket.
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to; port 0 picks a free port
    /// * `router` - Request router
    pub async fn bind(addr: SocketAddr, router: Router) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            router: Arc::new(router),
        })
    }

    /// Returns the address the server is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Serves connections until `shutdown` resolves.
    ///
    /// On shutdown the listener stops accepting and open connections are
    /// asked to close once their in-flight request is answered. Connections
    /// still open after `shutdown_timeout_ms` are aborted, which releases
    /// their handles on the runtime channel.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()>,
    {
        tracing::info!("Server listening on http://{}", self.local_addr()?);
        let builder = ConnectionBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            let accepted = tokio::select! {
                accepted = self.listener.accept() => accepted,
                _ = &mut shutdown => break,
            };
            while connections.try_join_next().is_some() {}

            let (stream, peer) = match accepted {
                Ok(accepted) => accepted,
                Err(err) if is_connection_error(&err) => {
                    tracing::debug!("Connection dropped before accept: {}", err);
                    continue;
                }
                Err(err) => {
                    tracing::error!("Failed to accept connection: {}", err);
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    continue;
                }
            };

            let router = Arc::clone(&self.router);
            let conn = builder.serve_connection(
                TokioIo::new(stream),
                hyper::service::service_fn(move |req| handle_request(req, router.clone())),
            );
            let conn = graceful.watch(conn.into_owned());
            connections.spawn(async move {
                if let Err(err) = conn.await {
                    tracing::error!("Error serving connection from {}: {}", peer, err);
                }
            });
        }

        tracing::info!(
            "Shutting down server, draining {} open connections",
            connections.len()
        );
        let timeout = Duration::from_millis(self.router.config().shutdown_timeout_ms);
        if tokio::time::timeout(timeout, graceful.shutdown())
            .await
            .is_err()
        {
            tracing::warn!(
                "Connections still open after {:?}, aborting {}",
                timeout,
                connections.len()
            );
        }
        connections.shutdown().await;
        Ok(())
    }
}

/// Accept errors caused by one peer going away; the listener itself is fine.
fn is_connection_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}

/// Handles an incoming HTTP request.
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
) -> HyperResult<Response<Full<Bytes>>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = router.route(req).await.unwrap_or_else(|err| {
        if err.status().is_server_error() {
            tracing::error!("Error handling {} {}: {}", method, path, err);
        } else {
            tracing::debug!("Rejected {} {}: {}", method, path, err);
        }
        Response::from(err)
    });
    tracing::debug!("{} {} -> {}", method, path, response.status());

    Ok(response.map(Full::new))
}
