use holdem_core::Chips;
use holdem_core::EngineError;
use serde::Deserialize;
use serde::Serialize;

/// Immutable-per-table configuration. Every field has a documented default
/// (§6.1) so callers may omit any subset when creating a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub max_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_stack: Chips,
    pub max_debt_per_player: Chips,
    pub action_timer_secs: u64,
    pub blind_increase_interval_mins: u64,
    pub show_hand_strength: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            max_players: 10,
            small_blind: 5,
            big_blind: 10,
            min_buy_in: 100,
            max_stack: 2000,
            max_debt_per_player: 1000,
            action_timer_secs: 30,
            blind_increase_interval_mins: 15,
            show_hand_strength: false,
        }
    }
}

impl TableSettings {
    /// Reject settings outside the ranges §3/§4.10 require.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(2..=10).contains(&self.max_players) {
            return Err(EngineError::invalid_argument("maxPlayers must be in [2, 10]"));
        }
        if self.small_blind <= 0 {
            return Err(EngineError::invalid_argument("smallBlind must be positive"));
        }
        if self.big_blind <= self.small_blind {
            return Err(EngineError::invalid_argument("bigBlind must exceed smallBlind"));
        }
        if self.min_buy_in <= 0 {
            return Err(EngineError::invalid_argument("minBuyIn must be positive"));
        }
        if self.max_stack < self.min_buy_in {
            return Err(EngineError::invalid_argument("maxStack must be at least minBuyIn"));
        }
        if self.max_debt_per_player < 0 {
            return Err(EngineError::invalid_argument("maxDebtPerPlayer must be non-negative"));
        }
        if self.action_timer_secs == 0 {
            return Err(EngineError::invalid_argument("actionTimer must be positive"));
        }
        if self.blind_increase_interval_mins == 0 {
            return Err(EngineError::invalid_argument("blindIncreaseInterval must be positive"));
        }
        Ok(())
    }
}
