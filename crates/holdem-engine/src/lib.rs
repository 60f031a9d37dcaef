//! The six table-lifecycle and gameplay operations wired against a
//! `TableStore`/`LedgerStore` pair: `createTable`, `joinTable`, `leaveTable`,
//! `startGame`, `playerAction`, and `endHand`, plus the expired-action sweep
//! an external scheduler drives.
mod engine;
mod showdown;

pub use engine::Engine;
