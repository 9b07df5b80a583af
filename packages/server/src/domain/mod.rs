//! ドメイン層
//!
//! ライブフィードの接続・データフィード状態・送信イベントを表すモデルと、
//! UseCase 層が依存するポート（trait）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod batch;
pub mod config;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod scheduler;
pub mod value_object;

pub use batch::{generate_batch, next_data_delay};
pub use config::FeedConfig;
pub use entity::{Connection, DataFeedState, FeedEvent};
pub use error::{ConfigError, MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::ConnectionRepository;
pub use scheduler::FeedScheduler;
pub use value_object::{ClientId, ClientIdFactory, DataBatch};
