use holdem_core::Chips;
use holdem_core::EngineError;
use holdem_core::TableId;
use holdem_gameplay::Action;
use holdem_gameplay::TableSettings;
use serde::Deserialize;

/// The action kind alone, without an amount -- `playerAction` carries the
/// raise amount as a sibling field rather than embedding it in the action
/// (§6.1), unlike [`Action`] itself which is a single self-contained value
/// once inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// Every field is optional; an omitted field takes `TableSettings::default()`
/// (§6.1).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub max_players: Option<usize>,
    pub small_blind: Option<Chips>,
    pub big_blind: Option<Chips>,
    pub min_buy_in: Option<Chips>,
    pub max_stack: Option<Chips>,
    pub max_debt_per_player: Option<Chips>,
    pub action_timer_secs: Option<u64>,
    pub blind_increase_interval_mins: Option<u64>,
    pub show_hand_strength: Option<bool>,
}

impl CreateTableRequest {
    /// Merge the supplied fields over the default settings.
    pub fn into_settings(self) -> TableSettings {
        let default = TableSettings::default();
        TableSettings {
            max_players: self.max_players.unwrap_or(default.max_players),
            small_blind: self.small_blind.unwrap_or(default.small_blind),
            big_blind: self.big_blind.unwrap_or(default.big_blind),
            min_buy_in: self.min_buy_in.unwrap_or(default.min_buy_in),
            max_stack: self.max_stack.unwrap_or(default.max_stack),
            max_debt_per_player: self.max_debt_per_player.unwrap_or(default.max_debt_per_player),
            action_timer_secs: self.action_timer_secs.unwrap_or(default.action_timer_secs),
            blind_increase_interval_mins: self.blind_increase_interval_mins.unwrap_or(default.blind_increase_interval_mins),
            show_hand_strength: self.show_hand_strength.unwrap_or(default.show_hand_strength),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTableRequest {
    pub table_id: TableId,
    pub buy_in_amount: Chips,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTableRequest {
    pub table_id: TableId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub table_id: TableId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionRequest {
    pub table_id: TableId,
    pub action: ActionKind,
    pub raise_amount: Option<Chips>,
}

impl PlayerActionRequest {
    pub fn action(&self) -> Result<Action, EngineError> {
        match self.action {
            ActionKind::Fold => Ok(Action::Fold),
            ActionKind::Check => Ok(Action::Check),
            ActionKind::Call => Ok(Action::Call),
            ActionKind::AllIn => Ok(Action::AllIn),
            ActionKind::Raise => {
                let amount = self
                    .raise_amount
                    .ok_or_else(|| EngineError::invalid_argument("raise requires raiseAmount"))?;
                Ok(Action::Raise { amount })
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndHandRequest {
    pub table_id: TableId,
}
