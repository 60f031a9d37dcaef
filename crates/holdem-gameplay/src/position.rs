use holdem_core::Position;
use rand::Rng;
use std::fmt::Display;
use std::fmt::Formatter;

/// Dealer/small-blind/big-blind assignment for a new hand, given the
/// previous dealer (if any) and the seats currently dealt into the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blinds {
    pub dealer: Position,
    pub small_blind: Position,
    pub big_blind: Position,
    pub first_to_act: Position,
}

/// Compute blind positions for `table_size` seats (indices `0..table_size`,
/// all assumed dealt-in and able to post). `previous_dealer` rotates one
/// seat clockwise; `None` means this is the table's first hand, and a
/// dealer is drawn uniformly at random from `rng`.
pub fn assign_blinds<R: Rng + ?Sized>(table_size: usize, previous_dealer: Option<Position>, rng: &mut R) -> Blinds {
    assert!(table_size >= 2, "a hand needs at least two seats");
    let dealer = match previous_dealer {
        Some(prev) => (prev + 1) % table_size,
        None => rng.random_range(0..table_size),
    };
    if table_size == 2 {
        // Heads-up: dealer doubles as small blind and acts first preflop.
        let big_blind = (dealer + 1) % table_size;
        Blinds {
            dealer,
            small_blind: dealer,
            big_blind,
            first_to_act: dealer,
        }
    } else {
        let small_blind = (dealer + 1) % table_size;
        let big_blind = (dealer + 2) % table_size;
        let first_to_act = (big_blind + 1) % table_size;
        Blinds {
            dealer,
            small_blind,
            big_blind,
            first_to_act,
        }
    }
}

/// First seat to act postflop: the first non-folded, non-all-in seat
/// clockwise from the dealer.
pub fn first_to_act_postflop<F>(table_size: usize, dealer: Position, can_act: F) -> Option<Position>
where
    F: Fn(Position) -> bool,
{
    (1..=table_size)
        .map(|offset| (dealer + offset) % table_size)
        .find(|&pos| can_act(pos))
}

/// Next seat clockwise from `from` that can still act, wrapping the table.
pub fn next_to_act<F>(table_size: usize, from: Position, can_act: F) -> Option<Position>
where
    F: Fn(Position) -> bool,
{
    (1..=table_size)
        .map(|offset| (from + offset) % table_size)
        .find(|&pos| can_act(pos))
}

/// Human-readable position name, relative to the dealer. Display only; it
/// never participates in legality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionName {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun(usize),
    MiddlePosition(usize),
    HijackSeat,
    CutoffSeat,
}

impl PositionName {
    pub fn of(position: Position, dealer: Position, table_size: usize) -> Self {
        let offset = (position + table_size - dealer) % table_size;
        match table_size {
            2 => match offset {
                0 => PositionName::Button,
                _ => PositionName::BigBlind,
            },
            n if n <= 6 => match offset {
                0 => PositionName::Button,
                1 => PositionName::SmallBlind,
                2 => PositionName::BigBlind,
                3 => PositionName::UnderTheGun(0),
                o if o == n - 2 => PositionName::HijackSeat,
                o if o == n - 1 => PositionName::CutoffSeat,
                o => PositionName::MiddlePosition(o - 4),
            },
            n => match offset {
                0 => PositionName::Button,
                1 => PositionName::SmallBlind,
                2 => PositionName::BigBlind,
                o if o == n - 2 => PositionName::HijackSeat,
                o if o == n - 1 => PositionName::CutoffSeat,
                o if o <= 4 => PositionName::UnderTheGun(o - 3),
                o => PositionName::MiddlePosition(o - 5),
            },
        }
    }
}

impl Display for PositionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionName::Button => write!(f, "BTN"),
            PositionName::SmallBlind => write!(f, "SB"),
            PositionName::BigBlind => write!(f, "BB"),
            PositionName::HijackSeat => write!(f, "HJ"),
            PositionName::CutoffSeat => write!(f, "CO"),
            PositionName::UnderTheGun(0) => write!(f, "UTG"),
            PositionName::UnderTheGun(n) => write!(f, "UTG+{n}"),
            PositionName::MiddlePosition(0) => write!(f, "MP"),
            PositionName::MiddlePosition(n) => write!(f, "MP+{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn heads_up_dealer_is_small_blind() {
        let mut rng = SmallRng::seed_from_u64(1);
        let blinds = assign_blinds(2, Some(0), &mut rng);
        assert_eq!(blinds.dealer, 1);
        assert_eq!(blinds.small_blind, 1);
        assert_eq!(blinds.big_blind, 0);
        assert_eq!(blinds.first_to_act, 1);
    }

    #[test]
    fn three_handed_blinds_rotate() {
        let mut rng = SmallRng::seed_from_u64(1);
        let blinds = assign_blinds(3, Some(2), &mut rng);
        assert_eq!(blinds.dealer, 0);
        assert_eq!(blinds.small_blind, 1);
        assert_eq!(blinds.big_blind, 2);
        assert_eq!(blinds.first_to_act, 0);
    }

    #[test]
    fn first_hand_picks_a_dealer_in_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        let blinds = assign_blinds(4, None, &mut rng);
        assert!(blinds.dealer < 4);
    }

    #[test]
    fn postflop_first_actor_skips_folded_and_allin() {
        let folded = [false, true, false, false];
        let pos = first_to_act_postflop(4, 0, |p| !folded[p]);
        assert_eq!(pos, Some(2));
    }
}
