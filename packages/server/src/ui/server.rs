//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetConnectionsUseCase, HandleCommandUseCase,
};

use super::{
    handler::{health_check, list_connections, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Live-feed server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     handle_command_usecase,
///     disconnect_client_usecase,
///     get_connections_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 3001).await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    handle_command_usecase: Arc<HandleCommandUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    get_connections_usecase: Arc<GetConnectionsUseCase>,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        handle_command_usecase: Arc<HandleCommandUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        get_connections_usecase: Arc<GetConnectionsUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            handle_command_usecase,
            disconnect_client_usecase,
            get_connections_usecase,
        }
    }

    /// Build the router with all endpoints
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            handle_command_usecase: self.handle_command_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            get_connections_usecase: self.get_connections_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/connections", get(list_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(
        self,
        listener: tokio::net::TcpListener,
        shutdown: F,
    ) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Live-feed server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Run the live-feed server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3001)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;
        Ok(())
    }
}
