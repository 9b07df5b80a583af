//! tokio のタイマーを使った FeedScheduler 実装
//!
//! - ハートビート: `tokio::time::interval`（接続直後に 1 回、その後は一定周期）
//! - データフィード: ランダムな遅延で sleep → バッチ送信 → 次の遅延を再設定、のループ
//!
//! どちらのループも送信に失敗した時点（チャンネルが閉じた時点）で自然終了する。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use livefeed_shared::time::Clock;
use rand::{SeedableRng, rngs::StdRng};
use tokio::{sync::Mutex, time::MissedTickBehavior};

use crate::domain::{
    ClientId, FeedConfig, FeedEvent, FeedScheduler, MessagePusher, generate_batch,
    next_data_delay,
};

use super::task::ScheduledTask;

/// 1 接続分のタイマーハンドル
#[derive(Debug, Default)]
struct ConnectionTimers {
    heartbeat: Option<ScheduledTask>,
    data_feed: Option<ScheduledTask>,
}

/// tokio タスクでハートビートとデータフィードを駆動するスケジューラ
pub struct TokioFeedScheduler {
    config: FeedConfig,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    timers: Mutex<HashMap<ClientId, ConnectionTimers>>,
}

impl TokioFeedScheduler {
    pub fn new(
        config: FeedConfig,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            message_pusher,
            clock,
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// タイマーを保持している接続数
    pub async fn active_connections(&self) -> usize {
        self.timers.lock().await.len()
    }
}

#[async_trait]
impl FeedScheduler for TokioFeedScheduler {
    async fn start_heartbeat(&self, client_id: &ClientId) {
        let mut timers = self.timers.lock().await;
        let entry = timers.entry(*client_id).or_default();
        if entry.heartbeat.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        entry.heartbeat = Some(ScheduledTask::spawn(
            "heartbeat",
            heartbeat_loop(
                *client_id,
                self.config.clone(),
                self.message_pusher.clone(),
                self.clock.clone(),
            ),
        ));
        tracing::debug!("Heartbeat started for client {}", client_id);
    }

    async fn start_data_feed(&self, client_id: &ClientId) -> bool {
        let mut timers = self.timers.lock().await;
        let entry = timers.entry(*client_id).or_default();
        if entry.data_feed.as_ref().is_some_and(|t| !t.is_finished()) {
            return false;
        }

        entry.data_feed = Some(ScheduledTask::spawn(
            "data-feed",
            data_feed_loop(
                *client_id,
                self.config.clone(),
                self.message_pusher.clone(),
            ),
        ));
        tracing::debug!("Data feed scheduled for client {}", client_id);
        true
    }

    async fn stop_data_feed(&self, client_id: &ClientId) -> bool {
        let task = {
            let mut timers = self.timers.lock().await;
            timers.get_mut(client_id).and_then(|t| t.data_feed.take())
        };

        match task {
            Some(task) => {
                task.cancel().await;
                tracing::debug!("Data feed cancelled for client {}", client_id);
                true
            }
            None => false,
        }
    }

    async fn cancel_all(&self, client_id: &ClientId) {
        let removed = self.timers.lock().await.remove(client_id);
        let Some(timers) = removed else {
            return;
        };

        if let Some(task) = timers.data_feed {
            task.cancel().await;
        }
        if let Some(task) = timers.heartbeat {
            task.cancel().await;
        }
        tracing::debug!("All timers cancelled for client {}", client_id);
    }
}

/// 接続直後に 1 回目を送り、以降は `heartbeat_interval` ごとに送る。
///
/// `interval` の初回 tick は即時なので、最初の timeStamp は 1 周期を待たずに届く
/// （1 周期後に初回を送る実装とは異なる）。
async fn heartbeat_loop(
    client_id: ClientId,
    config: FeedConfig,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
) {
    let mut ticker = tokio::time::interval(config.heartbeat_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let event = FeedEvent::TimeStamp(clock.now_utc());
        if let Err(e) = message_pusher.push_to(&client_id, event).await {
            tracing::debug!("Heartbeat for client {} ended: {}", client_id, e);
            break;
        }
    }
}

async fn data_feed_loop(
    client_id: ClientId,
    config: FeedConfig,
    message_pusher: Arc<dyn MessagePusher>,
) {
    let mut rng = StdRng::from_entropy();

    loop {
        let delay = next_data_delay(&mut rng, &config);
        tokio::time::sleep(delay).await;

        let batch = generate_batch(&mut rng);
        if let Err(e) = message_pusher.push_to(&client_id, FeedEvent::Data(batch)).await {
            tracing::debug!("Data feed for client {} ended: {}", client_id, e);
            break;
        }
    }
}
