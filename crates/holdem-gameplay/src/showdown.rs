use holdem_cards::Strength;
use holdem_core::Chips;
use holdem_core::Position;

/// One seat's stake and outcome at showdown: how much it risked this hand,
/// whether it folded, and -- once settled -- how much it won back.
#[derive(Debug, Clone)]
pub struct Settlement {
    position: Position,
    risked: Chips,
    folded: bool,
    strength: Strength,
    reward: Chips,
}

impl Settlement {
    pub fn new(position: Position, risked: Chips, folded: bool, strength: Strength) -> Self {
        Self {
            position,
            risked,
            folded,
            strength,
            reward: 0,
        }
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn risked(&self) -> Chips {
        self.risked
    }
    pub fn reward(&self) -> Chips {
        self.reward
    }
    fn add(&mut self, amount: Chips) {
        self.reward += amount;
    }
}

/// Resolves a hand's pots into final per-seat rewards, iterating by
/// strength tier from strongest to weakest and, within a tier, by pot level
/// from smallest side pot to largest. Ported from a tiered side-pot
/// settlement routine: find the strongest unprocessed hand, find the
/// narrowest pot level it is eligible for, split that level's chips among
/// every seat tied at that strength, and repeat until every risked chip has
/// been rewarded.
pub struct Showdown {
    payouts: Vec<Settlement>,
    distributing: Chips,
    distributed: Chips,
    best: Option<Strength>,
    /// Odd-chip award order: winners earlier in this list receive the
    /// leftover chips from an uneven split first. Clockwise from the small
    /// blind, per house convention.
    order: Vec<Position>,
}

impl Showdown {
    pub fn new(payouts: Vec<Settlement>, odd_chip_order: Vec<Position>) -> Self {
        Self {
            payouts,
            distributing: 0,
            distributed: 0,
            best: None,
            order: odd_chip_order,
        }
    }

    /// Single-survivor fast path: award the whole pot without evaluating
    /// hands. Returns `None` if more than one seat is still in the hand.
    pub fn award_uncontested(seats: &[(Position, Chips, bool)]) -> Option<Vec<(Position, Chips)>> {
        let live: Vec<&(Position, Chips, bool)> = seats.iter().filter(|(_, _, folded)| !folded).collect();
        if live.len() != 1 {
            return None;
        }
        let pot: Chips = seats.iter().map(|(_, risked, _)| risked).sum();
        Some(vec![(live[0].0, pot)])
    }

    pub fn settle(mut self) -> Vec<Settlement> {
        while let Some(strength) = self.strongest() {
            self.best = Some(strength);
            while let Some(amount) = self.remaining() {
                self.distributing = amount;
                self.distribute();
                if self.is_complete() {
                    return self.payouts;
                }
            }
        }
        self.payouts
    }

    fn strongest(&self) -> Option<Strength> {
        self.payouts
            .iter()
            .filter(|p| !p.folded)
            .filter(|p| self.best.map_or(true, |best| p.strength.total_order() < best.total_order()))
            .map(|p| p.strength)
            .max_by_key(|s| s.total_order())
    }

    fn remaining(&mut self) -> Option<Chips> {
        self.distributed = self.distributing;
        let best = self.best?;
        self.payouts
            .iter()
            .filter(|p| !p.folded)
            .filter(|p| p.strength.total_order() == best.total_order())
            .filter(|p| p.risked > self.distributed)
            .map(|p| p.risked)
            .min()
    }

    fn winnings(&self) -> Chips {
        self.payouts
            .iter()
            .map(|p| p.risked.min(self.distributing))
            .map(|s| (s - self.distributed).max(0))
            .sum()
    }

    fn distribute(&mut self) {
        let chips = self.winnings();
        let Some(best) = self.best else { return };
        let distributed = self.distributed;
        let order = &self.order;
        let mut winners: Vec<&mut Settlement> = self
            .payouts
            .iter_mut()
            .filter(|p| !p.folded)
            .filter(|p| p.strength.total_order() == best.total_order())
            .filter(|p| p.risked > distributed)
            .collect();
        winners.sort_by_key(|w| {
            order
                .iter()
                .position(|&pos| pos == w.position)
                .unwrap_or(usize::MAX)
        });
        let n = winners.len() as Chips;
        if n == 0 {
            return;
        }
        let share = chips / n;
        let bonus = chips % n;
        for winner in winners.iter_mut() {
            winner.add(share);
        }
        for winner in winners.iter_mut().take(bonus as usize) {
            winner.add(1);
        }
    }

    fn is_complete(&self) -> bool {
        let staked: Chips = self.payouts.iter().map(|p| p.risked).sum();
        let reward: Chips = self.payouts.iter().map(|p| p.reward).sum();
        staked == reward
    }
}

/// Build the clockwise-from-small-blind seat order used to award odd chips.
pub fn odd_chip_order(table_size: usize, small_blind: Position) -> Vec<Position> {
    (0..table_size).map(|offset| (small_blind + offset) % table_size).collect()
}

/// Convenience entry point taking the same `(position, amount)` contribution
/// shape as [`crate::pot::calculate_pots`]: wraps each contribution and its
/// showdown strength in a [`Settlement`] and runs them through a single
/// [`Showdown::settle`] pass, which derives side-pot-equivalent payouts
/// directly from the raw risked amounts without materializing a `Pot` list.
pub fn resolve(
    contributions: &[(Position, Chips)],
    folded: &[Position],
    strengths: &[(Position, Strength)],
    odd_chip_order: Vec<Position>,
) -> Vec<(Position, Chips)> {
    let payouts: Vec<Settlement> = contributions
        .iter()
        .map(|&(pos, risked)| {
            let strength = strengths
                .iter()
                .find(|(p, _)| *p == pos)
                .map(|(_, s)| *s)
                .unwrap_or_else(|| Strength::from(holdem_cards::Hand::empty()));
            Settlement::new(pos, risked, folded.contains(&pos), strength)
        })
        .collect();
    Showdown::new(payouts, odd_chip_order)
        .settle()
        .into_iter()
        .map(|s| (s.position, s.reward))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_cards::Kickers;
    use holdem_cards::Rank;
    use holdem_cards::Ranking;

    fn strength(ranking: Ranking) -> Strength {
        Strength::from((ranking, Kickers::from(0)))
    }
    fn ace_high() -> Strength {
        strength(Ranking::HighCard(Rank::Ace))
    }
    fn one_pair() -> Strength {
        strength(Ranking::OnePair(Rank::Ace))
    }
    fn two_pair() -> Strength {
        strength(Ranking::TwoPair(Rank::Ace, Rank::King))
    }
    fn triplets() -> Strength {
        strength(Ranking::ThreeOAK(Rank::Ace))
    }
    fn the_nuts() -> Strength {
        strength(Ranking::Straight(Rank::Ace))
    }

    fn default_order(n: usize) -> Vec<Position> {
        (0..n).collect()
    }

    #[test]
    fn heads_up_showdown() {
        let payouts = Showdown::new(
            vec![
                Settlement::new(0, 100, false, ace_high()),
                Settlement::new(1, 100, false, one_pair()),
            ],
            default_order(2),
        )
        .settle();
        assert_eq!(payouts[0].reward(), 0);
        assert_eq!(payouts[1].reward(), 200);
    }

    #[test]
    fn winners_folded() {
        let payouts = Showdown::new(
            vec![
                Settlement::new(0, 50, true, the_nuts()),
                Settlement::new(1, 100, false, two_pair()),
                Settlement::new(2, 75, true, the_nuts()),
                Settlement::new(3, 100, false, one_pair()),
            ],
            default_order(4),
        )
        .settle();
        assert_eq!(payouts[0].reward(), 0);
        assert_eq!(payouts[1].reward(), 325);
        assert_eq!(payouts[2].reward(), 0);
        assert_eq!(payouts[3].reward(), 0);
    }

    #[test]
    fn multiway_pot_split() {
        let payouts = Showdown::new(
            vec![
                Settlement::new(0, 100, false, two_pair()),
                Settlement::new(1, 100, false, two_pair()),
                Settlement::new(2, 100, false, one_pair()),
            ],
            default_order(3),
        )
        .settle();
        assert_eq!(payouts[0].reward(), 150);
        assert_eq!(payouts[1].reward(), 150);
        assert_eq!(payouts[2].reward(), 0);
    }

    /// Scenario E: split pot with an odd chip, awarded to the seat first in
    /// clockwise-from-small-blind order.
    #[test]
    fn split_pot_odd_chip_goes_to_small_blind() {
        let payouts = Showdown::new(
            vec![
                Settlement::new(0, 15, false, two_pair()),
                Settlement::new(1, 0, false, two_pair()),
            ],
            odd_chip_order(2, 0),
        )
        .settle();
        assert_eq!(payouts[0].reward() + payouts[1].reward(), 15);
        assert_eq!(payouts[0].reward(), 8);
        assert_eq!(payouts[1].reward(), 7);
    }

    #[test]
    fn multiway_all_in_with_side_pot() {
        let payouts = Showdown::new(
            vec![
                Settlement::new(0, 50, false, the_nuts()),
                Settlement::new(1, 100, false, triplets()),
                Settlement::new(2, 150, false, one_pair()),
                Settlement::new(3, 150, false, ace_high()),
            ],
            default_order(4),
        )
        .settle();
        assert_eq!(payouts[0].reward(), 200);
        assert_eq!(payouts[1].reward(), 150);
        assert_eq!(payouts[2].reward(), 100);
        assert_eq!(payouts[3].reward(), 0);
    }

    #[test]
    fn last_man_standing() {
        let payouts = Showdown::new(
            vec![
                Settlement::new(0, 50, true, the_nuts()),
                Settlement::new(1, 100, false, ace_high()),
                Settlement::new(2, 75, true, the_nuts()),
                Settlement::new(3, 25, true, the_nuts()),
            ],
            default_order(4),
        )
        .settle();
        assert_eq!(payouts[0].reward(), 0);
        assert_eq!(payouts[1].reward(), 250);
        assert_eq!(payouts[2].reward(), 0);
        assert_eq!(payouts[3].reward(), 0);
    }
}
