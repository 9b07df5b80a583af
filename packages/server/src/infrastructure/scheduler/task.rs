//! Cancellable handle around a spawned timer loop.

use std::future::Future;

use tokio::task::JoinHandle;

/// A spawned background loop that is aborted when cancelled or dropped.
///
/// `cancel` waits for the task to finish, so nothing the loop would send
/// afterwards can reach the outbound queue once it returns.
#[derive(Debug)]
pub struct ScheduledTask {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn `future` on the current tokio runtime.
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            handle: Some(tokio::spawn(future)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the loop has already ended on its own (e.g. the channel closed).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Abort the task and wait until it has stopped.
    pub async fn cancel(mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        handle.abort();
        match handle.await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {}
            Err(e) => tracing::warn!("Task '{}' ended with error: {}", self.name, e),
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    fn counting_loop(counter: Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        async move {
            loop {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        }
    }

    #[tokio::test]
    async fn test_cancel_stops_task_immediately() {
        // テスト項目: cancel から戻った後はタスクが一切実行されない
        // given (前提条件):
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ScheduledTask::spawn("counter", counting_loop(counter.clone()));
        tokio::time::sleep(Duration::from_millis(30)).await;

        // when (操作):
        task.cancel().await;
        let after_cancel = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;

        // then (期待する結果):
        assert!(after_cancel > 0);
        assert_eq!(counter.load(Ordering::SeqCst), after_cancel);
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        // テスト項目: ハンドルを drop するとタスクが中断される
        // given (前提条件):
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ScheduledTask::spawn("counter", counting_loop(counter.clone()));
        tokio::time::sleep(Duration::from_millis(20)).await;

        // when (操作):
        drop(task);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_drop = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;

        // then (期待する結果):
        assert_eq!(counter.load(Ordering::SeqCst), after_drop);
    }

    #[tokio::test]
    async fn test_is_finished_after_loop_returns() {
        // テスト項目: 自然終了したタスクは is_finished が true になる
        // given (前提条件):
        let task = ScheduledTask::spawn("oneshot", async {});

        // when (操作):
        tokio::time::sleep(Duration::from_millis(20)).await;

        // then (期待する結果):
        assert!(task.is_finished());
        assert_eq!(task.name(), "oneshot");
    }
}
