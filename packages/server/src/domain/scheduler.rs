//! FeedScheduler trait 定義
//!
//! 接続ごとのハートビートとデータフィードのタイマーを管理するインターフェース。
//! 取り消し（cancel）は完了を待ってから戻るため、戻った時点で
//! 該当ストリームのフレームがそれ以上送信キューに積まれることはない。

use async_trait::async_trait;

use super::ClientId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedScheduler: Send + Sync {
    /// ハートビートを開始（すでに動いていれば何もしない）
    async fn start_heartbeat(&self, client_id: &ClientId);

    /// データフィードを開始
    ///
    /// 新たにタイマーを張った場合のみ `true` を返す。
    async fn start_data_feed(&self, client_id: &ClientId) -> bool;

    /// データフィードを停止
    ///
    /// 保留中のタイマーを取り消した場合のみ `true` を返す。
    async fn stop_data_feed(&self, client_id: &ClientId) -> bool;

    /// ハートビートとデータフィードの両方を取り消す
    async fn cancel_all(&self, client_id: &ClientId);
}
