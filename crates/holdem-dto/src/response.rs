use holdem_core::Chips;
use holdem_core::HandNumber;
use holdem_core::Position;
use holdem_core::TableId;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableResponse {
    pub table_id: TableId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTableResponse {
    pub position: Position,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTableResponse {
    pub chips_cashed_out: Chips,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub hand_number: HandNumber,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionResponse {
    pub message: String,
}

/// One seat's final payout at showdown, regardless of whether it won
/// anything (a losing seat appears with `amount == 0`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutLine {
    pub position: Position,
    pub player_id: String,
    pub amount: Chips,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndHandResponse {
    /// Positions that received a nonzero award.
    pub winners: Vec<Position>,
    pub payouts: Vec<PayoutLine>,
}
