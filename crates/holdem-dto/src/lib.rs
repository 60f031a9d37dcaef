//! Request and response shapes for the six engine operations (§6.1).
//!
//! Kept deliberately thin: these are wire types only, with no behavior
//! beyond `CreateTableRequest::into_settings` and
//! `PlayerActionRequest::action`, both of which exist to reassemble a
//! `holdem_gameplay` value from a looser wire shape.
mod request;
mod response;

pub use request::ActionKind;
pub use request::CreateTableRequest;
pub use request::EndHandRequest;
pub use request::JoinTableRequest;
pub use request::LeaveTableRequest;
pub use request::PlayerActionRequest;
pub use request::StartGameRequest;

pub use response::CreateTableResponse;
pub use response::EndHandResponse;
pub use response::JoinTableResponse;
pub use response::LeaveTableResponse;
pub use response::PayoutLine;
pub use response::PlayerActionResponse;
pub use response::StartGameResponse;
