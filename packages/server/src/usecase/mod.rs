//! UseCase 層
//!
//! 接続・コマンド処理・切断・状態参照の各ユースケースを提供します。
//! ドメイン層のポート（trait）にのみ依存します。

mod connect_client;
mod disconnect_client;
mod error;
mod get_connections;
mod handle_command;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{CommandError, ConnectError, DisconnectError};
pub use get_connections::GetConnectionsUseCase;
pub use handle_command::HandleCommandUseCase;
