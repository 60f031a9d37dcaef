use super::rank::Rank;
use super::suit::Suit;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism: `rank*4 + suit`, matching the canonical deck order.
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.rank as u8) * 4 + (c.suit as u8)
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 isomorphism: a single bit in a 52-bit board/hand mask.
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1u64 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        assert!(n != 0 && n.count_ones() == 1, "not a single-card bitmask");
        Self::from(n.trailing_zeros() as u8)
    }
}

/// Serializes as the `rank*4 + suit` byte, not as a `{rank, suit}` struct --
/// matches the isomorphism already used for the evaluator's bit masks.
impl serde::Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        u8::from(*self).serialize(serializer)
    }
}
impl<'de> serde::Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Card::from(u8::deserialize(deserializer)?))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_roundtrip() {
        for n in 0u8..52 {
            let card = Card::from(n);
            assert_eq!(u8::from(card), n);
        }
    }

    #[test]
    fn display_format() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.to_string(), "As");
    }
}
