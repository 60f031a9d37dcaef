use holdem_core::Chips;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// An action a player may submit on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise { amount: Chips },
    AllIn,
}

impl Action {
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Raise { .. } | Action::AllIn)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call => write!(f, "CALL"),
            Action::Raise { amount } => write!(f, "RAISE {amount}"),
            Action::AllIn => write!(f, "ALLIN"),
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut parts = s.split_whitespace();
        match parts.next().unwrap_or_default().to_uppercase().as_str() {
            "FOLD" => Ok(Action::Fold),
            "CHECK" => Ok(Action::Check),
            "CALL" => Ok(Action::Call),
            "ALLIN" => Ok(Action::AllIn),
            "RAISE" => {
                let amount = parts
                    .next()
                    .ok_or_else(|| "RAISE requires an amount".to_string())?
                    .parse::<Chips>()
                    .map_err(|e| format!("invalid raise amount: {e}"))?;
                Ok(Action::Raise { amount })
            }
            other => Err(format!("unrecognized action '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_round_trip() {
        for (text, action) in [
            ("FOLD", Action::Fold),
            ("CHECK", Action::Check),
            ("CALL", Action::Call),
            ("ALLIN", Action::AllIn),
            ("RAISE 50", Action::Raise { amount: 50 }),
        ] {
            assert_eq!(Action::try_from(text).unwrap(), action);
            assert_eq!(Action::try_from(action.to_string().as_str()).unwrap(), action);
        }
    }

    #[test]
    fn raise_without_amount_is_rejected() {
        assert!(Action::try_from("RAISE").is_err());
    }
}
