use holdem_cards::Card;
use holdem_core::Chips;
use holdem_core::Position;
use serde::Deserialize;
use serde::Serialize;

/// A seat's lifecycle within a single hand. `Sitting` is the only status a
/// seat can hold across hand boundaries without yet being dealt in -- see
/// the deal-in-at-big-blind rule in [`crate::position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Sitting,
    Playing,
    Folded,
    AllIn,
}

impl SeatStatus {
    pub fn is_folded(&self) -> bool {
        matches!(self, SeatStatus::Folded)
    }
    pub fn is_all_in(&self) -> bool {
        matches!(self, SeatStatus::AllIn)
    }
    /// Neither folded nor all-in: still has a decision to make this hand.
    pub fn is_active(&self) -> bool {
        matches!(self, SeatStatus::Playing)
    }
}

/// A player occupying a position at a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    position: Position,
    player_id: String,
    chips: Chips,
    status: SeatStatus,
    current_bet: Chips,
    /// Total chips committed to the pot this hand, across every betting
    /// round (unlike `current_bet`, which resets at each phase transition).
    /// This is what the pot calculator sorts contribution levels by.
    total_contributed: Chips,
    has_acted: bool,
    is_dealer: bool,
    is_small_blind: bool,
    is_big_blind: bool,
    hole: Option<(Card, Card)>,
    /// Monotonic join order, used to pick a deterministic host successor.
    joined_at: u64,
}

impl Seat {
    pub fn new(position: Position, player_id: impl Into<String>, chips: Chips, joined_at: u64) -> Self {
        Self {
            position,
            player_id: player_id.into(),
            chips,
            status: SeatStatus::Sitting,
            current_bet: 0,
            total_contributed: 0,
            has_acted: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            hole: None,
            joined_at,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
    pub fn player_id(&self) -> &str {
        &self.player_id
    }
    pub fn chips(&self) -> Chips {
        self.chips
    }
    pub fn status(&self) -> SeatStatus {
        self.status
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn total_contributed(&self) -> Chips {
        self.total_contributed
    }
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }
    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }
    pub fn is_folded(&self) -> bool {
        self.status.is_folded()
    }
    pub fn is_all_in(&self) -> bool {
        self.status.is_all_in()
    }
    pub fn hole(&self) -> Option<(Card, Card)> {
        self.hole
    }
    pub fn joined_at(&self) -> u64 {
        self.joined_at
    }

    pub fn set_chips(&mut self, chips: Chips) {
        self.chips = chips;
    }
    pub fn set_status(&mut self, status: SeatStatus) {
        self.status = status;
    }
    pub fn set_current_bet(&mut self, amount: Chips) {
        self.current_bet = amount;
    }
    pub fn set_has_acted(&mut self, acted: bool) {
        self.has_acted = acted;
    }
    pub fn set_dealer(&mut self, is_dealer: bool) {
        self.is_dealer = is_dealer;
    }
    pub fn set_small_blind(&mut self, is_sb: bool) {
        self.is_small_blind = is_sb;
    }
    pub fn set_big_blind(&mut self, is_bb: bool) {
        self.is_big_blind = is_bb;
    }
    pub fn deal(&mut self, hole: (Card, Card)) {
        self.hole = Some(hole);
    }
    pub fn clear_hole(&mut self) {
        self.hole = None;
    }

    /// Move `amount` (capped at the seat's stack) from chips into the pot,
    /// returning the amount actually moved and flipping to all-in if the
    /// stack hits zero.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.current_bet += moved;
        self.total_contributed += moved;
        if self.chips == 0 && self.status != SeatStatus::Folded {
            self.status = SeatStatus::AllIn;
        }
        moved
    }

    pub fn reset_for_betting_round(&mut self) {
        self.current_bet = 0;
        if self.status == SeatStatus::Playing {
            self.has_acted = false;
        }
    }

    /// Clear all per-hand state so the seat is ready for a fresh deal.
    pub fn reset_for_new_hand(&mut self) {
        self.current_bet = 0;
        self.total_contributed = 0;
        self.has_acted = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.hole = None;
        if self.chips > 0 && self.status != SeatStatus::Sitting {
            self.status = SeatStatus::Playing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_caps_at_remaining_chips_and_flips_allin() {
        let mut seat = Seat::new(0, "p1", 30, 0);
        seat.set_status(SeatStatus::Playing);
        let moved = seat.commit(100);
        assert_eq!(moved, 30);
        assert_eq!(seat.chips(), 0);
        assert_eq!(seat.current_bet(), 30);
        assert_eq!(seat.total_contributed(), 30);
        assert!(seat.is_all_in());
    }

    #[test]
    fn total_contributed_survives_round_reset_but_not_hand_reset() {
        let mut seat = Seat::new(0, "p1", 500, 0);
        seat.set_status(SeatStatus::Playing);
        seat.commit(10);
        seat.reset_for_betting_round();
        seat.commit(20);
        assert_eq!(seat.total_contributed(), 30);
        assert_eq!(seat.current_bet(), 20);
        seat.reset_for_new_hand();
        assert_eq!(seat.total_contributed(), 0);
    }
}
