//! FeedScheduler の実装
//!
//! - `task`: 取り消し可能なバックグラウンドタスクのハンドル
//! - `timer`: tokio のタイマーを使った実装

pub mod task;
pub mod timer;

pub use task::ScheduledTask;
pub use timer::TokioFeedScheduler;
