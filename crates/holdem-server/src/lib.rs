//! HTTP surface for the six table-lifecycle and gameplay operations
//! (§6.1), plus the action-timer sweep (§6.5) an external scheduler drives.
//!
//! Generic over the `TableStore`/`LedgerStore` pair so the same routes serve
//! the in-memory default and the `postgres`-backed stores without
//! duplicating a line of handler code.
pub mod caller;
pub mod error;
pub mod handlers;
pub mod sweep;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use holdem_engine::Engine;
use holdem_store::LedgerStore;
use holdem_store::MemoryLedgerStore;
use holdem_store::MemoryTableStore;
use holdem_store::TableStore;
use std::sync::Arc;
use std::time::Duration;

/// Action-timer sweep cadence; well under the default 30s `actionTimer` so a
/// delinquent player is folded within a few seconds of their deadline.
const SWEEP_PERIOD: Duration = Duration::from_secs(5);

fn configure<S, L>(cfg: &mut web::ServiceConfig)
where
    S: TableStore + 'static,
    L: LedgerStore + 'static,
{
    cfg.route("/health", web::get().to(handlers::health)).service(
        web::scope("/api")
            .route("/createTable", web::post().to(handlers::create_table::<S, L>))
            .route("/joinTable", web::post().to(handlers::join_table::<S, L>))
            .route("/leaveTable", web::post().to(handlers::leave_table::<S, L>))
            .route("/startGame", web::post().to(handlers::start_game::<S, L>))
            .route("/playerAction", web::post().to(handlers::player_action::<S, L>))
            .route("/endHand", web::post().to(handlers::end_hand::<S, L>)),
    );
}

/// Run the server against the in-memory stores, binding to `BIND_ADDR`.
/// The `postgres` feature's stores implement the same traits, so swapping
/// backends is a matter of constructing a different `Engine` and calling
/// `run_with` directly rather than this convenience entrypoint.
pub async fn run() -> Result<(), std::io::Error> {
    let store = MemoryTableStore::shared();
    let ledger = Arc::new(MemoryLedgerStore::new());
    let engine = Engine::new(store, ledger);
    run_with(engine).await
}

/// Run the server against a caller-supplied engine, so binaries that wire up
/// the `postgres` stores can share this route table and sweep loop.
pub async fn run_with<S, L>(engine: Engine<S, L>) -> Result<(), std::io::Error>
where
    S: TableStore + Send + Sync + 'static,
    L: LedgerStore + Send + Sync + 'static,
{
    let engine = Arc::new(engine);
    let sweep_handle = sweep::spawn(Arc::clone(&engine), SWEEP_PERIOD);

    let data = web::Data::from(engine);
    log::info!("starting holdem server");
    let result = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
            .app_data(data.clone())
            .configure(configure::<S, L>)
    })
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await;

    sweep_handle.abort();
    result
}
