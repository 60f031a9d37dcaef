//! Drives the action-timer scheduler (§6.5): on an interval, ask the engine
//! to fold every player whose clock has run out. A safety net, not the
//! primary path -- `playerAction` already resolves showdowns inline as they
//! happen.
use holdem_engine::Engine;
use holdem_store::LedgerStore;
use holdem_store::TableStore;
use std::sync::Arc;
use std::time::Duration;

/// Spawn a tokio task that sweeps expired action deadlines every `period`.
/// Returns the task's handle so callers may abort it on shutdown.
pub fn spawn<S, L>(engine: Arc<Engine<S, L>>, period: Duration) -> tokio::task::JoinHandle<()>
where
    S: TableStore + Send + Sync + 'static,
    L: LedgerStore + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match engine.sweep_expired_actions().await {
                Ok(0) => {}
                Ok(n) => log::info!("swept {n} table(s) with an expired action deadline"),
                Err(e) => log::error!("action-timer sweep failed: {e}"),
            }
        }
    })
}
