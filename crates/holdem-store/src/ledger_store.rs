use holdem_core::Chips;
use holdem_core::EngineError;
use holdem_ledger::Ledger;
use holdem_ledger::LedgerEntry;
use holdem_ledger::LedgerEntryKind;
use tokio::sync::Mutex;

/// A ledger backend, global across tables (§6.3's `ledger/{playerId}`). Every
/// method is a single round trip and does its own locking -- unlike
/// `TableStore`, ledger mutations never need optimistic-concurrency retries
/// because `append` itself is commutative across players and monotonic per
/// player.
#[async_trait::async_trait]
pub trait LedgerStore: Send + Sync {
    async fn current_balance(&self, player_id: &str) -> Result<Chips, EngineError>;
    async fn would_exceed_debt_ceiling(&self, player_id: &str, buy_in: Chips, max_debt_per_player: Chips) -> Result<bool, EngineError>;
    async fn append(
        &self,
        player_id: &str,
        kind: LedgerEntryKind,
        amount: Chips,
        table_id: Option<String>,
        timestamp: u64,
    ) -> Result<LedgerEntry, EngineError>;
    async fn history(&self, player_id: &str) -> Result<Vec<LedgerEntry>, EngineError>;
}

/// In-memory `LedgerStore`, the default backend for tests and the local
/// binary: a single shared [`Ledger`] behind a `Mutex`.
#[derive(Default)]
pub struct MemoryLedgerStore {
    ledger: Mutex<Ledger>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn current_balance(&self, player_id: &str) -> Result<Chips, EngineError> {
        Ok(self.ledger.lock().await.current_balance(player_id))
    }

    async fn would_exceed_debt_ceiling(&self, player_id: &str, buy_in: Chips, max_debt_per_player: Chips) -> Result<bool, EngineError> {
        Ok(self.ledger.lock().await.would_exceed_debt_ceiling(player_id, buy_in, max_debt_per_player))
    }

    async fn append(
        &self,
        player_id: &str,
        kind: LedgerEntryKind,
        amount: Chips,
        table_id: Option<String>,
        timestamp: u64,
    ) -> Result<LedgerEntry, EngineError> {
        Ok(self.ledger.lock().await.append(player_id, kind, amount, table_id, timestamp))
    }

    async fn history(&self, player_id: &str) -> Result<Vec<LedgerEntry>, EngineError> {
        Ok(self.ledger.lock().await.history(player_id).to_vec())
    }
}
