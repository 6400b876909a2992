//! HTTP surface of the notes API.
//!
//! | Method | Path              | Success                 |
//! |--------|-------------------|-------------------------|
//! | GET    | `/api/notes`      | 200, array of notes     |
//! | POST   | `/api/notes`      | 200, stored note        |
//! | GET    | `/api/notes/{id}` | 200, one note           |
//! | DELETE | `/api/notes/{id}` | 204, empty body         |
//!
//! Failures answer `{"error": "..."}`: 400 for a missing `content` or a
//! malformed id, 404 for an absent note or unknown path, 405 for a known
//! path with an unsupported method.

pub mod error;
pub mod handlers;
mod request_tracing;

use std::net::SocketAddr;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{NotesError, Result};
use crate::service::NotesService;
use handlers::{
    create_note, delete_note, get_note, list_notes, method_not_allowed, unknown_endpoint,
};
use request_tracing::request_tracing_middleware;

pub use error::{ApiError, ErrorBody};

/// Build the application router around `service`.
pub fn router(service: NotesService) -> Router {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}", get(get_note).delete(delete_note))
        .fallback(unknown_endpoint)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn(request_tracing_middleware))
        .with_state(service)
}

/// A bound but not yet serving listener.
pub struct NotesServer {
    listener: TcpListener,
    service: NotesService,
}

impl NotesServer {
    pub async fn bind(addr: SocketAddr, service: NotesService) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, service })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start accepting connections on a background task.
    pub fn serve(self) -> Result<ServerHandle> {
        let Self { listener, service } = self;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();

        let app = router(service.clone());
        let signal = shutdown.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
        });

        tracing::info!(%addr, "notes api listening");
        Ok(ServerHandle {
            addr,
            shutdown,
            task,
            service,
        })
    }
}

/// Running server. Dropping it without [`ServerHandle::shutdown`] leaves the task running.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<std::io::Result<()>>,
    service: NotesService,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn service(&self) -> &NotesService {
        &self.service
    }

    /// Token that stops the server when cancelled, for wiring up signal handlers.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stop accepting, drain in-flight requests, release the socket and flush the store.
    pub async fn shutdown(self) -> Result<()> {
        self.shutdown.cancel();
        self.wait().await
    }

    /// Wait until the server stops on its own (its shutdown token was cancelled).
    pub async fn wait(self) -> Result<()> {
        let served = self
            .task
            .await
            .map_err(|e| NotesError::Io(std::io::Error::other(e)))?;
        let flushed = self.service.flush().await;
        served?;
        flushed?;
        tracing::info!(addr = %self.addr, "notes api stopped");
        Ok(())
    }
}
