//! Core type aliases, identifiers, and error taxonomy for the holdem workspace.
//!
//! Every other crate in this workspace depends on this one for the vocabulary
//! it uses to talk about money, seats, and failure.
#![allow(dead_code)]

mod error;
mod table_id;

pub use error::EngineError;
pub use error::ErrorKind;
pub use table_id::TableId;

/// Chip amounts. Signed so that ledger deltas (buy-ins are negative) share
/// the same type as on-table stacks.
pub type Chips = i64;
/// Seat index around a table, in `[0, maxPlayers)`.
pub type Position = usize;
/// Hand counter, monotonically increasing per table.
pub type HandNumber = u64;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn init_logging() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register a Ctrl+C handler that logs and exits immediately.
#[cfg(feature = "server")]
pub fn init_interrupt() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("install ctrl-c handler");
        log::warn!("interrupt received, shutting down");
        std::process::exit(0);
    });
}
