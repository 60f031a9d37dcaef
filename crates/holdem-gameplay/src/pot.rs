use holdem_core::Chips;
use holdem_core::Position;

/// A main or side pot: an amount and the seats eligible to win it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<Position>,
}

/// Derive main/side pots from each seat's total contribution this hand.
///
/// `contributions` is every seat that put chips in, `(position, amount)`,
/// including folded seats (their chips still count toward pot totals, they
/// are simply excluded from every pot's eligibility list). Contribution
/// levels are sorted ascending; each level's pot is `(level - previous
/// level) * count of contributors at-or-above that level`. Any leftover
/// chips from a final odd level land in the last pot.
pub fn calculate_pots(contributions: &[(Position, Chips)], folded: &[Position]) -> Vec<Pot> {
    let mut levels: Vec<Chips> = contributions.iter().map(|&(_, amount)| amount).filter(|&a| a > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::new();
    let mut previous = 0;
    for &level in &levels {
        let contributors_at_or_above: Vec<Position> = contributions
            .iter()
            .filter(|&&(_, amount)| amount >= level)
            .map(|&(pos, _)| pos)
            .collect();
        let amount = (level - previous) * contributors_at_or_above.len() as Chips;
        let eligible: Vec<Position> = contributors_at_or_above
            .into_iter()
            .filter(|pos| !folded.contains(pos))
            .collect();
        pots.push(Pot { amount, eligible });
        previous = level;
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario C: three-way all-in with two side pots.
    #[test]
    fn three_way_all_in_creates_two_side_pots() {
        let contributions = [(0, 100), (1, 60), (2, 40)];
        let pots = calculate_pots(&contributions, &[]);
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0].amount, 120);
        assert_eq!(pots[0].eligible.len(), 3);
        assert_eq!(pots[1].amount, 40);
        assert_eq!(pots[1].eligible.len(), 2);
        assert_eq!(pots[2].amount, 40);
        assert_eq!(pots[2].eligible.len(), 1);
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn folded_seat_contributes_but_is_not_eligible() {
        let contributions = [(0, 50), (1, 50), (2, 50)];
        let pots = calculate_pots(&contributions, &[2]);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible, vec![0, 1]);
    }

    #[test]
    fn single_level_is_a_single_pot() {
        let contributions = [(0, 10), (1, 10), (2, 10)];
        let pots = calculate_pots(&contributions, &[]);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 30);
    }
}
