//! RoomService server creation and serving.
use axum::{routing::get, Router};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::ServerState;

pub fn make_app() -> Router<ServerState> {
    Router::new()
        .route("/healthcheck", get(|| async { "ok" }))
        .merge(crate::api::router())
        .layer(TraceLayer::new_for_http())
}

pub struct Server;

impl Server {
    /// Serves the reservation API on the given listener until a shutdown
    /// signal arrives.
    pub async fn serve(
        listener: std::net::TcpListener,
        state: ServerState,
    ) -> Result<(), crate::Error> {
        listener.set_nonblocking(true)?;
        let listener = tokio::net::TcpListener::from_std(listener)?;

        info!("starting server on {}", listener.local_addr()?);

        axum::serve(listener, make_app().with_state(state))
            .with_graceful_shutdown(shutdown())
            .await?;

        Ok(())
    }
}

async fn shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down the server");
}
