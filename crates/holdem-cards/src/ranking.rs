use super::rank::Rank;
use std::fmt::Display;
use std::fmt::Formatter;

/// A poker hand's category, carrying just enough rank information to order
/// it against hands of the same category. Remaining ties are broken by
/// [`crate::kickers::Kickers`]. Variant declaration order is strength order
/// (`derive(Ord)` compares discriminants first), matching standard hold'em
/// hand ranking from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
}

impl Ranking {
    /// How many kicker cards are needed to fully break a tie within this
    /// category. Straights and straight flushes need none (suits never
    /// break ties and a straight's rank alone determines it); full houses
    /// need none (trips rank then pair rank already fully order them).
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            Ranking::Flush(_) => 4,
            Ranking::Straight(_) | Ranking::StraightFlush(_) | Ranking::FullHouse(..) => 0,
        }
    }

    /// Bit mask (over a 13-bit rank mask) of ranks already accounted for by
    /// this category, to exclude from kicker selection.
    pub fn primary_mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => u16::from(hi) | u16::from(lo),
            Ranking::FullHouse(trips, pairs) => u16::from(trips) | u16::from(pairs),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::FourOAK(hi)
            | Ranking::ThreeOAK(hi)
            | Ranking::Flush(hi)
            | Ranking::Straight(hi)
            | Ranking::StraightFlush(hi) => u16::from(hi),
        }
    }

    /// Index into the strength ordering, used to build a flat `total_order`
    /// scalar. Kept independent from the derived discriminant so reordering
    /// enum variants in source can't silently change wire-visible values.
    pub fn category_index(&self) -> u32 {
        match self {
            Ranking::HighCard(_) => 0,
            Ranking::OnePair(_) => 1,
            Ranking::TwoPair(..) => 2,
            Ranking::ThreeOAK(_) => 3,
            Ranking::Straight(_) => 4,
            Ranking::Flush(_) => 5,
            Ranking::FullHouse(..) => 6,
            Ranking::FourOAK(_) => 7,
            Ranking::StraightFlush(_) => 8,
        }
    }
}

impl Display for Ranking {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Ranking::FullHouse(hi, lo) => write!(f, "FullHouse     {}{}", hi, lo),
            Ranking::TwoPair(hi, lo) => write!(f, "TwoPair       {}{}", hi, lo),
            Ranking::HighCard(r) => write!(f, "HighCard      {} ", r),
            Ranking::OnePair(r) => write!(f, "OnePair       {} ", r),
            Ranking::ThreeOAK(r) => write!(f, "ThreeOfAKind  {} ", r),
            Ranking::Straight(r) => write!(f, "Straight      {} ", r),
            Ranking::FourOAK(r) => write!(f, "FourOfAKind   {} ", r),
            Ranking::Flush(r) => write!(f, "Flush         {} ", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {} ", r),
        }
    }
}
