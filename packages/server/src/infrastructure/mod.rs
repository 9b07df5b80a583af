//! Infrastructure 層
//!
//! ドメイン層のポート（Repository / MessagePusher / FeedScheduler）の具体的な実装と、
//! ワイヤ形式・HTTP 応答の DTO を提供します。

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod scheduler;
