use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// A hand's street. Progresses strictly left to right except for the
/// early-terminal jumps to `Showdown` (last player standing, all-in runout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    /// How many community cards are on the board once this phase has dealt.
    pub fn board_size(&self) -> usize {
        match self {
            Phase::Preflop => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River | Phase::Showdown => 5,
        }
    }

    /// The phase betting proceeds to once the current round is complete,
    /// or `None` if `self` is already `Showdown`.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Preflop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            Phase::River => Some(Phase::Showdown),
            Phase::Showdown => None,
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Phase::Preflop => "preflop",
                Phase::Flop => "flop",
                Phase::Turn => "turn",
                Phase::River => "river",
                Phase::Showdown => "showdown",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_in_order() {
        let mut phase = Phase::Preflop;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            phase = next;
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![Phase::Preflop, Phase::Flop, Phase::Turn, Phase::River, Phase::Showdown]
        );
    }
}
