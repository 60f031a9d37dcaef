use super::evaluator;
use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kickers::Kickers;
use super::ranking::Ranking;
use std::fmt::Display;
use std::fmt::Formatter;

/// A hand's overall strength: its category plus the kickers needed to break
/// ties within that category. `Ord` compares lexicographically -- category
/// first, then kickers -- which is exactly standard poker tie-breaking.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn kickers(&self) -> Kickers {
        self.kickers
    }

    /// A single scalar, strictly monotone with this strength, suitable for
    /// comparing hands without re-deriving category/kicker structure.
    pub fn total_order(&self) -> u32 {
        evaluator::total_order(self.ranking, self.kickers)
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}
impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let (ranking, kickers) = e.evaluate();
        Self { ranking, kickers }
    }
}
impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kickers): (Ranking, Kickers)) -> Self {
        Self { ranking, kickers }
    }
}

impl Display for Strength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<18}{}", self.ranking, self.kickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::rank::Rank;
    use crate::suit::Suit;

    #[test]
    fn straight_beats_pair() {
        let straight = Hand::from(vec![
            Card::new(Rank::Ten, Suit::Spades),
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Queen, Suit::Diamonds),
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Spades),
        ]);
        let pair = Hand::from(vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Queen, Suit::Clubs),
            Card::new(Rank::Jack, Suit::Spades),
        ]);
        assert!(Strength::from(straight) > Strength::from(pair));
    }
}
