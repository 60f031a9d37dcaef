use std::fmt::Display;
use std::fmt::Formatter;

/// A 13-bit rank mask of the kicker cards that break a tie within a
/// [`crate::ranking::Ranking`] category. Structurally a rank mask, but kept
/// as a distinct type since its comparison semantics (more/higher ranks
/// wins) only make sense in the kicker role, never as a general hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default)]
pub struct Kickers(u16);

impl From<u16> for Kickers {
    fn from(mask: u16) -> Self {
        Self(mask)
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> u16 {
        k.0
    }
}

impl Display for Kickers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:013b}", self.0)
    }
}
