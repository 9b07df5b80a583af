//! Entities

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::value_object::{ClientId, DataBatch};

/// データフィードの状態
///
/// ハートビートとは独立した状態機械。`Idle` から始まり、
/// `start` で `Scheduled`、`stop` で `Idle` に戻る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFeedState {
    #[default]
    Idle,
    Scheduled,
}

/// サーバー側で管理する 1 接続分の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub client_id: ClientId,
    pub connected_at: DateTime<Utc>,
    pub feed: DataFeedState,
}

impl Connection {
    /// 新しい接続を作成（データフィードは `Idle`）
    pub fn new(client_id: ClientId, connected_at: DateTime<Utc>) -> Self {
        Self {
            client_id,
            connected_at,
            feed: DataFeedState::Idle,
        }
    }

    /// `Idle` → `Scheduled` に遷移する
    ///
    /// 遷移が発生した場合のみ `true` を返す。`Scheduled` 中の呼び出しは何もしない。
    pub fn start_feed(&mut self) -> bool {
        match self.feed {
            DataFeedState::Idle => {
                self.feed = DataFeedState::Scheduled;
                true
            }
            DataFeedState::Scheduled => false,
        }
    }

    /// `Scheduled` → `Idle` に遷移する
    ///
    /// 遷移が発生した場合のみ `true` を返す。`Idle` 中の呼び出しは何もしない。
    pub fn stop_feed(&mut self) -> bool {
        match self.feed {
            DataFeedState::Scheduled => {
                self.feed = DataFeedState::Idle;
                true
            }
            DataFeedState::Idle => false,
        }
    }
}

/// 接続に向けて送信するイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// 認識したコマンドへの応答
    Info(String),
    /// 不正な入力の報告
    Error(String),
    /// ハートビート
    TimeStamp(DateTime<Utc>),
    /// データフィードの 1 バッチ
    Data(DataBatch),
}
