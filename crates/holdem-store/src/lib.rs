//! Persistence for table documents and player ledgers.
//!
//! [`TableStore`] is the compare-and-swap interface every table document
//! lives behind; [`TransactionGateway`] wraps it with the read-mutate-commit
//! retry loop every RPC in `holdem-engine` runs its mutations through.
//! [`LedgerStore`] is the parallel interface for the player-keyed,
//! table-independent buy-in/cashout history.
//!
//! The in-memory implementations ([`MemoryTableStore`], [`MemoryLedgerStore`])
//! are the default; a `postgres` feature swaps in `Arc<tokio_postgres::Client>`
//! implementations of the same traits over a JSONB document column.
#![allow(dead_code)]

mod document;
mod gateway;
mod ledger_store;
mod table_store;

#[cfg(feature = "postgres")]
mod postgres;

pub use document::HandResult;
pub use document::TableDocument;
pub use document::TableStatus;
pub use gateway::TransactionGateway;
pub use ledger_store::LedgerStore;
pub use ledger_store::MemoryLedgerStore;
pub use table_store::MemoryTableStore;
pub use table_store::Revision;
pub use table_store::TableStore;

#[cfg(feature = "postgres")]
pub use postgres::db;
