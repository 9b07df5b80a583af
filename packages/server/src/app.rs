//! Dependency wiring for the live-feed server.

use std::sync::Arc;

use livefeed_shared::time::{Clock, SystemClock};

use crate::{
    domain::{ClientIdFactory, FeedConfig},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryConnectionRepository,
        scheduler::TokioFeedScheduler,
    },
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetConnectionsUseCase, HandleCommandUseCase,
    },
};

/// Build a server backed by the in-memory repository, the WebSocket pusher
/// and the tokio scheduler.
///
/// Initialization order:
/// 1. Repository
/// 2. MessagePusher
/// 3. FeedScheduler
/// 4. UseCases
/// 5. Server
pub fn build_server(config: FeedConfig) -> Server {
    build_server_with_clock(config, Arc::new(SystemClock))
}

/// Same as [`build_server`] with an explicit clock.
pub fn build_server_with_clock(config: FeedConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Repository (in-memory)
    let repository = Arc::new(InMemoryConnectionRepository::new());

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. FeedScheduler (tokio timers)
    let scheduler = Arc::new(TokioFeedScheduler::new(
        config,
        message_pusher.clone(),
        clock.clone(),
    ));

    // 4. UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        ClientIdFactory::new(),
        repository.clone(),
        message_pusher.clone(),
        scheduler.clone(),
        clock,
    ));
    let handle_command_usecase = Arc::new(HandleCommandUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        scheduler.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        repository.clone(),
        message_pusher,
        scheduler,
    ));
    let get_connections_usecase = Arc::new(GetConnectionsUseCase::new(repository));

    // 5. Server
    Server::new(
        connect_client_usecase,
        handle_command_usecase,
        disconnect_client_usecase,
        get_connections_usecase,
    )
}
