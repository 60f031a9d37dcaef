//! Seating, betting rounds, the hand state machine, and showdown
//! resolution. This crate owns every rule of how a single hand plays out;
//! it knows nothing about tables persisting across hands, wire formats, or
//! storage -- that is `holdem-engine` and `holdem-store`.

mod action;
mod hand;
mod phase;
mod pot;
mod position;
mod round;
mod seat;
mod settings;
mod showdown;

pub use action::Action;
pub use hand::ActionRecord;
pub use hand::Hand;
pub use phase::Phase;
pub use position::assign_blinds;
pub use position::first_to_act_postflop;
pub use position::next_to_act;
pub use position::Blinds;
pub use position::PositionName;
pub use pot::calculate_pots;
pub use pot::Pot;
pub use round::BettingRound;
pub use seat::Seat;
pub use seat::SeatStatus;
pub use settings::TableSettings;
pub use showdown::odd_chip_order;
pub use showdown::resolve;
pub use showdown::Showdown;
