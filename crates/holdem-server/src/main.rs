//! Binary entrypoint. Runs on `BIND_ADDR` (e.g. `0.0.0.0:8080`).
//!
//! Backs onto PostgreSQL when built with the `postgres` feature and `DB_URL`
//! is set; otherwise falls back to the in-memory stores (fine for local
//! development, not for a multi-process deployment -- §5's ordering
//! guarantees for the in-memory store only hold within one process).
use holdem_engine::Engine;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    holdem_core::init_logging();
    holdem_core::init_interrupt();

    #[cfg(feature = "postgres")]
    {
        if std::env::var("DB_URL").is_ok() {
            let client = holdem_store::db().await;
            let engine = Engine::new(Arc::new(client.clone()), Arc::new(client));
            holdem_server::run_with(engine).await.unwrap();
            return;
        }
    }

    let store = holdem_store::MemoryTableStore::shared();
    let ledger = Arc::new(holdem_store::MemoryLedgerStore::new());
    let engine = Engine::new(store, ledger);
    holdem_server::run_with(engine).await.unwrap();
}
