use holdem_core::Chips;
use serde::Deserialize;
use serde::Serialize;

/// Betting-round bookkeeping shared by every street: the amount every active
/// seat must match to stay in, and the smallest legal raise increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingRound {
    current_bet: Chips,
    min_raise: Chips,
}

impl BettingRound {
    /// A fresh round: nobody owes anything yet, and the smallest raise is a
    /// full big blind.
    pub fn new(big_blind: Chips) -> Self {
        Self {
            current_bet: 0,
            min_raise: big_blind,
        }
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    /// Override the opening bet after blinds are posted (the big blind may
    /// be short-stacked, so the true opening price can be less than a full
    /// big blind).
    pub fn with_current_bet(mut self, current_bet: Chips) -> Self {
        self.current_bet = current_bet;
        self
    }

    /// Record a call: does not change `current_bet`/`min_raise`.
    pub fn note_call(&mut self) {}

    /// Record a full raise to `amount` (strictly at least `current_bet +
    /// min_raise`): the new bet to match, and a new minimum raise increment
    /// equal to the size of this raise over the previous bet.
    pub fn note_raise(&mut self, amount: Chips) {
        let increment = amount - self.current_bet;
        self.current_bet = amount;
        self.min_raise = increment;
    }

    /// Record a short all-in that raises the bet but for less than a full
    /// increment: it becomes the new amount to call, but does not change
    /// the minimum raise (so action does not reopen for players who had
    /// already matched the previous, larger `current_bet`... in practice
    /// there is no larger previous bet here, since `amount` must exceed the
    /// old `current_bet` to get this far).
    pub fn note_short_allin(&mut self, amount: Chips) {
        self.current_bet = amount;
    }

    pub fn reset_for_new_street(&mut self, big_blind: Chips) {
        self.current_bet = 0;
        self.min_raise = big_blind;
    }
}
