use crate::entry::LedgerEntry;
use crate::entry::LedgerEntryKind;
use holdem_core::Chips;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// Every player's append-only transaction history, keyed by `playerId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    by_player: HashMap<String, Vec<LedgerEntry>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The player's most recent `runningBalance`, or `0` if they have never
    /// transacted.
    pub fn current_balance(&self, player_id: &str) -> Chips {
        self.by_player
            .get(player_id)
            .and_then(|entries| entries.last())
            .map(|entry| entry.running_balance)
            .unwrap_or(0)
    }

    /// Append a signed `amount` to `player_id`'s history and return the new
    /// entry. Callers are responsible for debt-ceiling checks (§4.9) before
    /// calling this -- `append` itself never rejects.
    pub fn append(
        &mut self,
        player_id: impl Into<String>,
        kind: LedgerEntryKind,
        amount: Chips,
        table_id: Option<String>,
        timestamp: u64,
    ) -> LedgerEntry {
        let player_id = player_id.into();
        let running_balance = self.current_balance(&player_id) + amount;
        let entry = LedgerEntry {
            player_id: player_id.clone(),
            kind,
            amount,
            table_id,
            timestamp,
            running_balance,
        };
        self.by_player.entry(player_id).or_default().push(entry.clone());
        entry
    }

    /// Whether buying in for `amount` chips would push `player_id`'s balance
    /// past `max_debt_per_player` in magnitude (§4.9's debt ceiling).
    pub fn would_exceed_debt_ceiling(&self, player_id: &str, buy_in: Chips, max_debt_per_player: Chips) -> bool {
        let proposed = self.current_balance(player_id) - buy_in;
        proposed.unsigned_abs() as Chips > max_debt_per_player
    }

    pub fn history(&self, player_id: &str) -> &[LedgerEntry] {
        self.by_player.get(player_id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
