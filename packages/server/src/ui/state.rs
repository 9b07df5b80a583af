//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetConnectionsUseCase, HandleCommandUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub handle_command_usecase: Arc<HandleCommandUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub get_connections_usecase: Arc<GetConnectionsUseCase>,
}
