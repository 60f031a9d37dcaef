use holdem_core::Chips;
use serde::Deserialize;
use serde::Serialize;

/// Why chips entered or left a player's running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryKind {
    Buy,
    Cashout,
}

/// One append-only entry in a player's transaction history. `amount` is
/// signed -- a `buy` is negative, a `cashout` positive -- so `runningBalance`
/// is always the prefix sum of every `amount` the player has ever posted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub player_id: String,
    pub kind: LedgerEntryKind,
    pub amount: Chips,
    pub table_id: Option<String>,
    /// Server-issued monotonic timestamp (seconds since epoch); the ledger
    /// itself never reads the clock, the caller stamps every entry.
    pub timestamp: u64,
    pub running_balance: Chips,
}
