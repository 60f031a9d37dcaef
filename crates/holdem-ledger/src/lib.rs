//! Append-only buy-in/cash-out accounting, kept independent of any storage
//! backend: `holdem-store` embeds a [`Ledger`] inside the table document (or,
//! under the `postgres` feature, a real `ledger` table), but every rule about
//! what a balance means lives here.

mod entry;
mod ledger;

pub use entry::LedgerEntry;
pub use entry::LedgerEntryKind;
pub use ledger::Ledger;
