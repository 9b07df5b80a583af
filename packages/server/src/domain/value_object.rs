//! Value Objects

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use super::error::ValueObjectError;

/// 接続を一意に識別する ID（1 以上の整数）
///
/// プロセスが生きている間は再利用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    pub fn new(value: u64) -> Result<Self, ValueObjectError> {
        if value == 0 {
            return Err(ValueObjectError::ZeroClientId);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ClientId の採番器
///
/// 1 から始まる単調増加カウンタ。グローバル変数ではなく、
/// 接続 UseCase が所有する形で注入する。
#[derive(Debug)]
pub struct ClientIdFactory {
    next: AtomicU64,
}

impl ClientIdFactory {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// 次の ClientId を払い出す
    pub fn generate(&self) -> ClientId {
        ClientId(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ClientIdFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// データフィードの 1 回分の送信内容（1〜4 個のトークン）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBatch(Vec<String>);

impl DataBatch {
    pub const MIN_TOKENS: usize = 1;
    pub const MAX_TOKENS: usize = 4;

    pub fn new(tokens: Vec<String>) -> Result<Self, ValueObjectError> {
        if !(Self::MIN_TOKENS..=Self::MAX_TOKENS).contains(&tokens.len()) {
            return Err(ValueObjectError::BatchSize {
                min: Self::MIN_TOKENS,
                max: Self::MAX_TOKENS,
                actual: tokens.len(),
            });
        }
        Ok(Self(tokens))
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_zero() {
        // テスト項目: 0 の ClientId は生成できない
        // given (前提条件):

        // when (操作):
        let result = ClientId::new(0);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::ZeroClientId));
    }

    #[test]
    fn test_client_id_factory_starts_at_one_and_increments() {
        // テスト項目: 採番器は 1 から始まり、重複なく単調増加する
        // given (前提条件):
        let factory = ClientIdFactory::new();

        // when (操作):
        let ids: Vec<u64> = (0..5).map(|_| factory.generate().value()).collect();

        // then (期待する結果):
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_independent_factories_do_not_share_state() {
        // テスト項目: 別々に生成した採番器は状態を共有しない
        // given (前提条件):
        let first = ClientIdFactory::new();
        let second = ClientIdFactory::new();
        first.generate();
        first.generate();

        // when (操作):
        let id = second.generate();

        // then (期待する結果):
        assert_eq!(id.value(), 1);
    }

    #[test]
    fn test_data_batch_accepts_one_to_four_tokens() {
        // テスト項目: 1〜4 個のトークンを持つ DataBatch は生成できる
        // given (前提条件):
        let token = || "Xabcdeab".to_string();

        // when (操作):
        let results: Vec<_> = (1..=4)
            .map(|n| DataBatch::new((0..n).map(|_| token()).collect()))
            .collect();

        // then (期待する結果):
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_data_batch_rejects_empty_and_oversized() {
        // テスト項目: 0 個または 5 個以上のトークンはエラーになる
        // given (前提条件):
        let five = vec!["Xabcdeab".to_string(); 5];

        // when (操作):
        let empty = DataBatch::new(vec![]);
        let oversized = DataBatch::new(five);

        // then (期待する結果):
        assert!(matches!(empty, Err(ValueObjectError::BatchSize { actual: 0, .. })));
        assert!(matches!(oversized, Err(ValueObjectError::BatchSize { actual: 5, .. })));
    }
}
