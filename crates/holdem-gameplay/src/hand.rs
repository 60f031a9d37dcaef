use crate::action::Action;
use crate::phase::Phase;
use crate::position;
use crate::round::BettingRound;
use crate::seat::Seat;
use crate::seat::SeatStatus;
use crate::settings::TableSettings;
use holdem_cards::Card;
use holdem_cards::Deck;
use holdem_core::Chips;
use holdem_core::EngineError;
use holdem_core::HandNumber;
use holdem_core::Position;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// One entry in a hand's action history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionRecord {
    pub position: Position,
    pub action: Action,
}

/// A single hand of play: deck, board, seats, betting round, and phase.
/// Owns every piece of state described in §3's "Hand" data model except the
/// wall-clock `actionDeadline`/`blindIncreaseAt` stamps, which the engine
/// manages alongside it (pure gameplay logic never reads the clock).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    hand_number: HandNumber,
    phase: Phase,
    seats: Vec<Seat>,
    dealer_position: Position,
    small_blind_position: Position,
    big_blind_position: Position,
    current_player: Option<Position>,
    community: Vec<Card>,
    deck: Deck,
    pot: Chips,
    round: BettingRound,
    big_blind: Chips,
    /// Whether the big blind still has an unexercised option to act again
    /// after everyone else has merely called preflop (§4.5).
    bb_option_pending: bool,
    actions: Vec<ActionRecord>,
}

impl Hand {
    /// Begin a new hand over the given seats (already updated to reflect
    /// current chip stacks and sitting/playing status from the table).
    /// Deals hole cards only to seats eligible to play this hand: already
    /// `Playing`/`Folded`/`AllIn` seats from a prior hand are refreshed to
    /// `Playing`, and any `Sitting` seat is dealt in only if it lands on the
    /// big blind this hand (§4.4's deal-in rule).
    pub fn start<R: Rng + ?Sized>(
        mut seats: Vec<Seat>,
        hand_number: HandNumber,
        settings: &TableSettings,
        previous_dealer: Option<Position>,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let n = seats.len();
        if n < 2 {
            return Err(EngineError::failed_precondition("a hand needs at least two seated players"));
        }
        let blinds = position::assign_blinds(n, previous_dealer, rng);

        for seat in seats.iter_mut() {
            let will_play = seat.status() != SeatStatus::Sitting || seat.position() == blinds.big_blind;
            if !will_play {
                continue;
            }
            if seat.status() == SeatStatus::Sitting {
                seat.set_status(SeatStatus::Playing);
            }
            seat.reset_for_new_hand();
        }
        for seat in seats.iter_mut() {
            seat.set_dealer(seat.position() == blinds.dealer);
            seat.set_small_blind(seat.position() == blinds.small_blind);
            seat.set_big_blind(seat.position() == blinds.big_blind);
        }

        let mut deck = Deck::new();
        deck.shuffle();

        // Deal clockwise starting just after the dealer, matching the order
        // chips and attention move around the table.
        let order: Vec<Position> = (1..=n).map(|offset| (blinds.dealer + offset) % n).collect();
        for &pos in &order {
            let playing = seats[pos].status() == SeatStatus::Playing || seats[pos].status() == SeatStatus::AllIn;
            if playing {
                let a = deck.deal(1)[0];
                let b = deck.deal(1)[0];
                seats[pos].deal((a, b));
            }
        }

        let mut pot: Chips = 0;
        for &(pos, amount) in &[(blinds.small_blind, settings.small_blind), (blinds.big_blind, settings.big_blind)] {
            let seat = &mut seats[pos];
            if seat.status() == SeatStatus::Playing || seat.status() == SeatStatus::AllIn {
                pot += seat.commit(amount);
                seat.set_has_acted(true);
            }
        }
        let posted_big_blind = seats[blinds.big_blind].current_bet();
        let round = BettingRound::new(settings.big_blind).with_current_bet(posted_big_blind);
        let bb_option_pending = seats[blinds.big_blind].status() == SeatStatus::Playing;

        let mut hand = Self {
            hand_number,
            phase: Phase::Preflop,
            seats,
            dealer_position: blinds.dealer,
            small_blind_position: blinds.small_blind,
            big_blind_position: blinds.big_blind,
            current_player: Some(blinds.first_to_act),
            community: Vec::new(),
            deck,
            pot,
            round,
            big_blind: settings.big_blind,
            bb_option_pending,
            actions: Vec::new(),
        };
        hand.skip_to_actable_player();
        Ok(hand)
    }

    pub fn hand_number(&self) -> HandNumber {
        self.hand_number
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn dealer_position(&self) -> Position {
        self.dealer_position
    }
    pub fn small_blind_position(&self) -> Position {
        self.small_blind_position
    }
    pub fn big_blind_position(&self) -> Position {
        self.big_blind_position
    }
    pub fn current_player(&self) -> Option<Position> {
        self.current_player
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn betting_round(&self) -> BettingRound {
        self.round
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn table_size(&self) -> usize {
        self.seats.len()
    }

    /// Every seat's total contribution this hand, for pot canonicalization.
    pub fn contributions(&self) -> Vec<(Position, Chips)> {
        self.seats.iter().map(|s| (s.position(), s.total_contributed())).collect()
    }
    pub fn folded_positions(&self) -> Vec<Position> {
        self.seats.iter().filter(|s| s.is_folded()).map(|s| s.position()).collect()
    }

    /// Hole cards for `player_id`, or `None` if they have no cards or do not
    /// occupy this seat -- the only read path outside the engine's own
    /// showdown resolution (§8.1 I8).
    pub fn hole_cards_for(&self, player_id: &str) -> Option<(Card, Card)> {
        self.seats.iter().find(|s| s.player_id() == player_id).and_then(|s| s.hole())
    }

    /// Every non-folded seat's hole cards, for the engine's showdown
    /// resolver only. Never exposed through a client-facing read path.
    pub fn hole_cards_at_showdown(&self) -> Vec<(Position, Card, Card)> {
        self.seats
            .iter()
            .filter(|s| !s.is_folded())
            .filter_map(|s| s.hole().map(|(a, b)| (s.position(), a, b)))
            .collect()
    }

    fn seat_mut(&mut self, position: Position) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.position() == position)
    }
    fn seat(&self, position: Position) -> Option<&Seat> {
        self.seats.iter().find(|s| s.position() == position)
    }

    /// Apply one action from `player_id`, validating turn order and
    /// per-action legality (§4.6), then advance the hand's turn/phase.
    pub fn apply_action(&mut self, player_id: &str, action: Action) -> Result<(), EngineError> {
        if self.phase == Phase::Showdown {
            return Err(EngineError::failed_precondition("hand has already reached showdown"));
        }
        let position = self
            .current_player
            .ok_or_else(|| EngineError::failed_precondition("no player is currently to act"))?;
        match self.seat(position) {
            Some(seat) if seat.player_id() == player_id => {}
            Some(_) => return Err(EngineError::permission_denied("it is not your turn")),
            None => return Err(EngineError::internal("current player position has no seat")),
        }
        self.validate_and_apply(position, action)?;
        self.actions.push(ActionRecord { position, action });
        self.advance()
    }

    /// Fold `player_id` out of turn, for a player leaving the table mid-hand
    /// (§4.10). Unlike [`Self::apply_action`] this does not require it to be
    /// their turn: a leaving player forfeits regardless of whose turn it is.
    pub fn force_fold(&mut self, player_id: &str) -> Result<(), EngineError> {
        if self.phase == Phase::Showdown {
            return Err(EngineError::failed_precondition("hand has already reached showdown"));
        }
        let position = self
            .seats
            .iter()
            .find(|s| s.player_id() == player_id)
            .map(|s| s.position())
            .ok_or_else(|| EngineError::not_found("player not seated in this hand"))?;
        let is_current = self.current_player == Some(position);
        let seat = self.seat_mut(position).expect("found above");
        if !seat.status().is_active() {
            return Err(EngineError::failed_precondition("player has already folded or is all-in"));
        }
        seat.set_status(SeatStatus::Folded);
        seat.set_has_acted(true);
        self.actions.push(ActionRecord { position, action: Action::Fold });

        if is_current {
            return self.advance();
        }
        let live = self.seats.iter().filter(|s| !s.is_folded()).count();
        if live <= 1 {
            self.run_out_remaining_streets();
            self.phase = Phase::Showdown;
            self.current_player = None;
            return Ok(());
        }
        if self.is_round_complete() {
            self.complete_round()
        } else {
            Ok(())
        }
    }

    /// Credit each winning seat with its showdown reward. Zero-amount
    /// entries are skipped; a position absent from `payouts` is left
    /// untouched.
    pub fn credit_payouts(&mut self, payouts: &[(Position, Chips)]) {
        for &(position, amount) in payouts {
            if amount == 0 {
                continue;
            }
            if let Some(seat) = self.seat_mut(position) {
                seat.set_chips(seat.chips() + amount);
            }
        }
    }

    fn validate_and_apply(&mut self, position: Position, action: Action) -> Result<(), EngineError> {
        let current_bet = self.round.current_bet();
        let min_raise = self.round.min_raise();
        let seat = self.seats.iter_mut().find(|s| s.position() == position).expect("seat exists");
        match action {
            Action::Fold => {
                seat.set_status(SeatStatus::Folded);
                seat.set_has_acted(true);
            }
            Action::Check => {
                if current_bet != seat.current_bet() {
                    return Err(EngineError::invalid_argument("cannot check facing a bet"));
                }
                seat.set_has_acted(true);
            }
            Action::Call => {
                if current_bet <= seat.current_bet() {
                    return Err(EngineError::invalid_argument("nothing to call; use check"));
                }
                let owed = current_bet - seat.current_bet();
                self.pot += seat.commit(owed);
                seat.set_has_acted(true);
            }
            Action::Raise { amount } => {
                if amount <= current_bet {
                    return Err(EngineError::invalid_argument("raise must exceed the current bet"));
                }
                let delta = amount - seat.current_bet();
                if delta > seat.chips() {
                    return Err(EngineError::invalid_argument("raise exceeds chip stack; go all-in instead"));
                }
                if amount < current_bet + min_raise {
                    return Err(EngineError::invalid_argument("raise below the minimum increment"));
                }
                self.pot += seat.commit(delta);
                seat.set_has_acted(true);
                self.round.note_raise(amount);
                self.reopen_action(position);
            }
            Action::AllIn => {
                if seat.chips() <= 0 {
                    return Err(EngineError::invalid_argument("no chips left to push all-in"));
                }
                let stake = seat.chips();
                self.pot += seat.commit(stake);
                let new_bet = seat.current_bet();
                seat.set_has_acted(true);
                if new_bet >= current_bet + min_raise && new_bet > current_bet {
                    self.round.note_raise(new_bet);
                    self.reopen_action(position);
                } else if new_bet > current_bet {
                    self.round.note_short_allin(new_bet);
                }
            }
        }
        Ok(())
    }

    fn reopen_action(&mut self, raiser: Position) {
        for seat in self.seats.iter_mut() {
            if seat.position() != raiser && seat.status().is_active() {
                seat.set_has_acted(false);
            }
        }
    }

    fn is_round_complete(&self) -> bool {
        let active: Vec<&Seat> = self.seats.iter().filter(|s| s.status().is_active()).collect();
        if active.is_empty() {
            return true;
        }
        active.iter().all(|s| s.has_acted() && s.current_bet() == self.round.current_bet())
    }

    /// After any action, move to the next actor, apply the big-blind option
    /// override, and either advance the phase (round complete) or leave the
    /// turn with the next actor.
    fn advance(&mut self) -> Result<(), EngineError> {
        let live = self.seats.iter().filter(|s| !s.is_folded()).count();
        if live <= 1 {
            self.phase = Phase::Showdown;
            self.current_player = None;
            return Ok(());
        }
        let current = self.current_player.expect("checked above");
        let next = position::next_to_act(self.seats.len(), current, |p| self.seats[p].status().is_active());
        if let Some(p) = next {
            self.apply_bb_option(p);
        }
        self.settle_or_continue(next)
    }

    /// Shared between `advance` and `skip_to_actable_player`: once it is
    /// clear which seat (if any) would act next, either run the rest of the
    /// board out (no one left who could contest further betting),
    /// advance the phase (this street is done), or hand the turn to `next`.
    fn settle_or_continue(&mut self, next: Option<Position>) -> Result<(), EngineError> {
        let active_can_act = self.seats.iter().filter(|s| s.status().is_active()).count();
        // At most one seat can still voluntarily bet: nobody else can be
        // bet into, so there is nothing left to decide this hand.
        if active_can_act <= 1 && (active_can_act == 0 || self.is_round_complete()) {
            self.run_out_remaining_streets();
            self.phase = Phase::Showdown;
            self.current_player = None;
            return Ok(());
        }
        if self.is_round_complete() {
            self.complete_round()
        } else {
            self.current_player = next;
            Ok(())
        }
    }

    fn apply_bb_option(&mut self, next: Position) {
        if self.phase == Phase::Preflop
            && self.bb_option_pending
            && next == self.big_blind_position
            && self.round.current_bet() == self.big_blind
        {
            if let Some(seat) = self.seat_mut(next) {
                if seat.status().is_active() {
                    seat.set_has_acted(false);
                    self.bb_option_pending = false;
                }
            }
        }
    }

    fn complete_round(&mut self) -> Result<(), EngineError> {
        let next_phase = self
            .phase
            .next()
            .ok_or_else(|| EngineError::internal("complete_round called at showdown"))?;
        if next_phase != Phase::Showdown {
            self.deal_phase_cards(next_phase);
        }
        for seat in self.seats.iter_mut() {
            if seat.status().is_active() {
                seat.reset_for_betting_round();
            }
        }
        self.round.reset_for_new_street(self.big_blind);
        self.phase = next_phase;
        self.bb_option_pending = false;
        if next_phase == Phase::Showdown {
            self.current_player = None;
        } else {
            let dealer = self.dealer_position;
            self.current_player = position::first_to_act_postflop(self.seats.len(), dealer, |p| self.seats[p].status().is_active());
        }
        Ok(())
    }

    fn deal_phase_cards(&mut self, phase: Phase) {
        match phase {
            Phase::Flop => {
                self.deck.deal(1);
                self.community.extend(self.deck.deal(3));
            }
            Phase::Turn | Phase::River => {
                self.deck.deal(1);
                self.community.extend(self.deck.deal(1));
            }
            Phase::Preflop | Phase::Showdown => {}
        }
    }

    fn run_out_remaining_streets(&mut self) {
        while let Some(next) = self.phase.next() {
            if next == Phase::Showdown {
                self.phase = next;
                break;
            }
            self.deal_phase_cards(next);
            self.phase = next;
        }
    }

    /// If whoever the hand opened on cannot act (already folded/all-in --
    /// only possible from a short-stacked blind), roll forward to whoever
    /// can, mirroring the same logic `advance` uses mid-hand.
    fn skip_to_actable_player(&mut self) {
        let Some(current) = self.current_player else { return };
        if self.seats[current].status().is_active() {
            return;
        }
        let next = position::next_to_act(self.seats.len(), current, |p| self.seats[p].status().is_active());
        if let Some(p) = next {
            self.apply_bb_option(p);
        }
        // Infallible here: settle_or_continue only errors past Showdown,
        // and a freshly dealt hand is always Preflop.
        self.settle_or_continue(next).expect("fresh hand cannot be at showdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seats(stacks: &[Chips]) -> Vec<Seat> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &chips)| {
                let mut s = Seat::new(i, format!("p{i}"), chips, i as u64);
                s.set_status(SeatStatus::Playing);
                s
            })
            .collect()
    }

    fn settings() -> TableSettings {
        TableSettings {
            small_blind: 5,
            big_blind: 10,
            ..Default::default()
        }
    }

    fn start(stacks: &[Chips]) -> Hand {
        let mut rng = SmallRng::seed_from_u64(42);
        Hand::start(seats(stacks), 1, &settings(), Some(0), &mut rng).unwrap()
    }

    /// Scenario A: single fold to win, 3-handed.
    #[test]
    fn single_fold_to_win() {
        let mut hand = start(&[500, 500, 500]);
        assert_eq!(hand.dealer_position(), 1);
        assert_eq!(hand.small_blind_position(), 2);
        assert_eq!(hand.big_blind_position(), 0);
        assert_eq!(hand.current_player(), Some(1));

        hand.apply_action("p1", Action::Fold).unwrap();
        hand.apply_action("p2", Action::Fold).unwrap();

        assert_eq!(hand.phase(), Phase::Showdown);
        assert_eq!(hand.current_player(), None);
        assert_eq!(hand.pot(), 15);
    }

    /// Scenario D: the big blind's option after two flat calls preflop.
    #[test]
    fn big_blind_option_is_offered_after_flat_calls() {
        let mut hand = start(&[500, 500, 500]);
        // dealer=1, sb=2, bb=0, first_to_act=1 (utg, since 3-handed wraps)
        hand.apply_action("p1", Action::Call).unwrap();
        hand.apply_action("p2", Action::Call).unwrap();
        // big blind must still get to act even though bets already match
        assert_eq!(hand.phase(), Phase::Preflop);
        assert_eq!(hand.current_player(), Some(0));

        hand.apply_action("p0", Action::Check).unwrap();
        assert_eq!(hand.phase(), Phase::Flop);
        assert_eq!(hand.community_cards().len(), 3);
    }

    #[test]
    fn heads_up_dealer_acts_first_preflop() {
        let hand = start(&[500, 500]);
        assert_eq!(hand.dealer_position(), 1);
        assert_eq!(hand.small_blind_position(), 1);
        assert_eq!(hand.big_blind_position(), 0);
        assert_eq!(hand.current_player(), Some(1));
    }

    #[test]
    fn raise_reopens_action_for_earlier_callers() {
        let mut hand = start(&[500, 500, 500]);
        hand.apply_action("p1", Action::Call).unwrap();
        hand.apply_action("p2", Action::Raise { amount: 30 }).unwrap();
        // p1 already called 10, but the raise to 30 must reopen their action
        assert_eq!(hand.current_player(), Some(0));
        hand.apply_action("p0", Action::Call).unwrap();
        assert_eq!(hand.current_player(), Some(1));
    }

    #[test]
    fn cannot_act_out_of_turn() {
        let mut hand = start(&[500, 500, 500]);
        let err = hand.apply_action("p2", Action::Call).unwrap_err();
        assert_eq!(err.kind(), holdem_core::ErrorKind::PermissionDenied);
    }

    #[test]
    fn check_facing_a_bet_is_rejected() {
        let mut hand = start(&[500, 500, 500]);
        let err = hand.apply_action("p1", Action::Check).unwrap_err();
        assert_eq!(err.kind(), holdem_core::ErrorKind::InvalidArgument);
    }

    #[test]
    fn short_allin_does_not_reopen_action_for_an_already_acted_caller() {
        // p2 is the small blind with a short 15-chip stack; after p1 calls,
        // p2 pushes all-in for less than a full raise increment over 10 --
        // this must not give p1 (already acted) another turn before the big
        // blind's option.
        let mut hand = start(&[500, 500, 15]);
        assert_eq!(hand.small_blind_position(), 2);
        hand.apply_action("p1", Action::Call).unwrap();
        hand.apply_action("p2", Action::AllIn).unwrap();
        // p2's stack (15) plus blind already posted (5) = 15 total bet,
        // which is less than current_bet(10) + min_raise(10) = 20, so it
        // does not reopen action; next to act is the big blind's option.
        assert_eq!(hand.current_player(), Some(0));
    }

    #[test]
    fn all_in_runout_deals_remaining_streets_without_betting() {
        let mut hand = start(&[20, 20, 500]);
        hand.apply_action("p1", Action::AllIn).unwrap();
        hand.apply_action("p2", Action::Call).unwrap();
        hand.apply_action("p0", Action::AllIn).unwrap();
        assert_eq!(hand.phase(), Phase::Showdown);
        assert_eq!(hand.community_cards().len(), 5);
    }

    #[test]
    fn force_fold_out_of_turn_leaves_current_player_untouched() {
        let mut hand = start(&[500, 500, 500]);
        assert_eq!(hand.current_player(), Some(1));
        // p2 leaves while it is p1's turn to act.
        hand.force_fold("p2").unwrap();
        assert_eq!(hand.current_player(), Some(1));
        assert!(hand.folded_positions().contains(&2));
    }

    #[test]
    fn force_fold_down_to_one_live_player_ends_the_hand() {
        let mut hand = start(&[500, 500, 500]);
        hand.force_fold("p1").unwrap();
        hand.force_fold("p0").unwrap();
        assert_eq!(hand.phase(), Phase::Showdown);
        assert_eq!(hand.current_player(), None);
    }

    #[test]
    fn force_fold_twice_is_rejected() {
        let mut hand = start(&[500, 500, 500]);
        hand.force_fold("p2").unwrap();
        let err = hand.force_fold("p2").unwrap_err();
        assert_eq!(err.kind(), holdem_core::ErrorKind::FailedPrecondition);
    }

    #[test]
    fn credit_payouts_adds_to_existing_stack() {
        let mut hand = start(&[500, 500, 500]);
        hand.credit_payouts(&[(0, 30), (1, 0)]);
        assert_eq!(hand.seats()[0].chips(), 500 - 10 + 30);
        assert_eq!(hand.seats()[1].chips(), 500 - 5);
    }
}
