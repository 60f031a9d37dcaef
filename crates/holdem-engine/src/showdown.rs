use holdem_cards::evaluate_best;
use holdem_cards::Strength;
use holdem_core::Chips;
use holdem_core::EngineError;
use holdem_core::HandNumber;
use holdem_core::Position;
use holdem_gameplay::odd_chip_order;
use holdem_gameplay::resolve;
use holdem_gameplay::Phase;
use holdem_gameplay::Showdown;
use holdem_store::HandResult;
use holdem_store::TableDocument;

/// One seat's final payout at showdown.
pub struct Payout {
    pub position: Position,
    pub player_id: String,
    pub amount: Chips,
}

/// The result of resolving a hand that has reached showdown.
pub struct Resolution {
    pub hand_number: HandNumber,
    pub payouts: Vec<Payout>,
}

/// Resolve the table's in-progress hand once it has reached showdown: credit
/// every seat's award, persist a [`HandResult`] summary, and tear the hand
/// down (§4.7). Pure with respect to the document -- no I/O, safe to call
/// from inside a `TransactionGateway::run` closure.
pub fn resolve_showdown(doc: &mut TableDocument) -> Result<Resolution, EngineError> {
    let hand = doc.hand().ok_or_else(|| EngineError::failed_precondition("no hand is in progress"))?;
    if hand.phase() != Phase::Showdown {
        return Err(EngineError::failed_precondition("hand has not reached showdown"));
    }

    let hand_number = hand.hand_number();
    let live: Vec<(Position, Chips, bool)> = hand
        .seats()
        .iter()
        .map(|s| (s.position(), s.total_contributed(), s.is_folded()))
        .collect();

    let (payout_amounts, uncontested) = match Showdown::award_uncontested(&live) {
        Some(payouts) => (payouts, true),
        None => {
            let contributions = hand.contributions();
            let folded = hand.folded_positions();
            let community = hand.community_cards().to_vec();
            let strengths: Vec<(Position, Strength)> = hand
                .hole_cards_at_showdown()
                .into_iter()
                .map(|(position, a, b)| {
                    let mut cards = vec![a, b];
                    cards.extend_from_slice(&community);
                    let (ranking, kickers) = evaluate_best(&cards);
                    (position, Strength::from((ranking, kickers)))
                })
                .collect();
            let order = odd_chip_order(hand.table_size(), hand.small_blind_position());
            (resolve(&contributions, &folded, &strengths, order), false)
        }
    };

    let hand_mut = doc.hand_mut().expect("checked present above");
    hand_mut.credit_payouts(&payout_amounts);

    let payouts: Vec<Payout> = payout_amounts
        .iter()
        .map(|&(position, amount)| {
            let player_id = hand_mut
                .seats()
                .iter()
                .find(|s| s.position() == position)
                .map(|s| s.player_id().to_string())
                .unwrap_or_default();
            Payout { position, player_id, amount }
        })
        .collect();

    let winners: Vec<(Position, Chips)> = payouts
        .iter()
        .filter(|p| p.amount > 0)
        .map(|p| (p.position, p.amount))
        .collect();
    doc.set_last_result(HandResult { hand_number, uncontested, winners });
    doc.end_hand();

    Ok(Resolution { hand_number, payouts })
}
