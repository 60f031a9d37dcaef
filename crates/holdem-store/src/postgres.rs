//! PostgreSQL-backed stores, enabled by the `postgres` feature.
//!
//! Mirrors the in-memory stores' semantics exactly: `tables` holds one row
//! per table keyed by its 4-digit id, with the document as `JSONB` and a
//! `revision` column doing the optimistic-concurrency work that
//! [`crate::MemoryTableStore`] does with a plain `Mutex`. `commit` runs
//! inside a `SERIALIZABLE` transaction so the read-compare-write is atomic
//! even under concurrent writers on different connections.
use crate::document::TableDocument;
use crate::ledger_store::LedgerStore;
use crate::table_store::Revision;
use crate::table_store::TableStore;
use holdem_core::Chips;
use holdem_core::EngineError;
use holdem_core::TableId;
use holdem_ledger::LedgerEntry;
use holdem_ledger::LedgerEntryKind;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::IsolationLevel;

#[rustfmt::skip]
pub const TABLES:       &str = "tables";
#[rustfmt::skip]
pub const LEDGER_ENTRIES: &str = "ledger_entries";

/// Establishes a database connection.
///
/// Connects to PostgreSQL using the `DB_URL` environment variable, spawning
/// the driver's connection future onto the runtime and returning a shared
/// client handle.
///
/// # Panics
///
/// Panics if `DB_URL` is not set or if connection fails.
pub async fn db() -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let url = std::env::var("DB_URL").expect("DB_URL must be set");
    let (client, connection) = tokio_postgres::connect(&url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(connection);
    Arc::new(client)
}

fn pg_err(context: &str, err: tokio_postgres::Error) -> EngineError {
    EngineError::internal(format!("{context}: {err}"))
}

fn decode_err(context: &str, err: serde_json::Error) -> EngineError {
    EngineError::internal(format!("{context}: {err}"))
}

#[async_trait::async_trait]
impl TableStore for Arc<Client> {
    async fn create(&self, document: TableDocument) -> Result<(), EngineError> {
        let encoded = serde_json::to_value(&document).map_err(|e| decode_err("encoding table document", e))?;
        let rows = self
            .execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    TABLES,
                    " (id, revision, document) VALUES ($1, 0, $2) ON CONFLICT (id) DO NOTHING"
                ),
                &[&document.id().to_string(), &encoded],
            )
            .await
            .map_err(|e| pg_err("inserting table", e))?;
        if rows == 0 {
            return Err(EngineError::already_exists(format!("table {} already exists", document.id())));
        }
        Ok(())
    }

    async fn read(&self, id: &TableId) -> Result<(Revision, TableDocument), EngineError> {
        let row = self
            .query_opt(
                const_format::concatcp!("SELECT revision, document FROM ", TABLES, " WHERE id = $1"),
                &[&id.to_string()],
            )
            .await
            .map_err(|e| pg_err("reading table", e))?
            .ok_or_else(|| EngineError::not_found(format!("table {id} not found")))?;
        let revision: i64 = row.get(0);
        let document: serde_json::Value = row.get(1);
        let document = serde_json::from_value(document).map_err(|e| decode_err("decoding table document", e))?;
        Ok((revision as Revision, document))
    }

    async fn commit(&self, id: &TableId, expected: Revision, document: TableDocument) -> Result<Revision, EngineError> {
        let builder = self
            .build_transaction()
            .isolation_level(IsolationLevel::Serializable);
        let transaction = builder.start().await.map_err(|e| pg_err("starting transaction", e))?;
        let row = transaction
            .query_opt(
                const_format::concatcp!("SELECT revision FROM ", TABLES, " WHERE id = $1 FOR UPDATE"),
                &[&id.to_string()],
            )
            .await
            .map_err(|e| pg_err("locking table row", e))?
            .ok_or_else(|| EngineError::not_found(format!("table {id} not found")))?;
        let current: i64 = row.get(0);
        if current != expected as i64 {
            return Err(EngineError::aborted(format!(
                "table {id} was modified concurrently (expected revision {expected}, found {current})"
            )));
        }
        let next = current + 1;
        let encoded = serde_json::to_value(&document).map_err(|e| decode_err("encoding table document", e))?;
        transaction
            .execute(
                const_format::concatcp!("UPDATE ", TABLES, " SET revision = $1, document = $2 WHERE id = $3"),
                &[&next, &encoded, &id.to_string()],
            )
            .await
            .map_err(|e| pg_err("updating table", e))?;
        transaction.commit().await.map_err(|e| pg_err("committing transaction", e))?;
        Ok(next as Revision)
    }

    async fn exists(&self, id: &TableId) -> Result<bool, EngineError> {
        let row = self
            .query_opt(
                const_format::concatcp!("SELECT 1 FROM ", TABLES, " WHERE id = $1"),
                &[&id.to_string()],
            )
            .await
            .map_err(|e| pg_err("checking table existence", e))?;
        Ok(row.is_some())
    }

    async fn list_active(&self) -> Result<Vec<TableId>, EngineError> {
        let rows = self
            .query(
                const_format::concatcp!("SELECT id FROM ", TABLES, " WHERE document ->> 'status' = 'playing'"),
                &[],
            )
            .await
            .map_err(|e| pg_err("listing active tables", e))?;
        rows.iter()
            .map(|row| TableId::parse(row.get(0)))
            .collect()
    }
}

#[async_trait::async_trait]
impl LedgerStore for Arc<Client> {
    async fn current_balance(&self, player_id: &str) -> Result<Chips, EngineError> {
        let row = self
            .query_opt(
                const_format::concatcp!(
                    "SELECT running_balance FROM ",
                    LEDGER_ENTRIES,
                    " WHERE player_id = $1 ORDER BY seq DESC LIMIT 1"
                ),
                &[&player_id],
            )
            .await
            .map_err(|e| pg_err("reading ledger balance", e))?;
        Ok(row.map(|row| row.get::<_, Chips>(0)).unwrap_or(0))
    }

    async fn would_exceed_debt_ceiling(&self, player_id: &str, buy_in: Chips, max_debt_per_player: Chips) -> Result<bool, EngineError> {
        let balance = self.current_balance(player_id).await?;
        let proposed = balance - buy_in;
        Ok(proposed.unsigned_abs() as Chips > max_debt_per_player)
    }

    async fn append(
        &self,
        player_id: &str,
        kind: LedgerEntryKind,
        amount: Chips,
        table_id: Option<String>,
        timestamp: u64,
    ) -> Result<LedgerEntry, EngineError> {
        let builder = self.build_transaction().isolation_level(IsolationLevel::Serializable);
        let transaction = builder.start().await.map_err(|e| pg_err("starting transaction", e))?;
        let kind_str = match kind {
            LedgerEntryKind::Buy => "buy",
            LedgerEntryKind::Cashout => "cashout",
        };
        let balance_row = transaction
            .query_opt(
                const_format::concatcp!(
                    "SELECT running_balance FROM ",
                    LEDGER_ENTRIES,
                    " WHERE player_id = $1 ORDER BY seq DESC LIMIT 1 FOR UPDATE"
                ),
                &[&player_id],
            )
            .await
            .map_err(|e| pg_err("locking ledger row", e))?;
        let previous: Chips = balance_row.map(|row| row.get(0)).unwrap_or(0);
        let running_balance = previous + amount;
        transaction
            .execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    LEDGER_ENTRIES,
                    " (player_id, kind, amount, table_id, ts, running_balance) VALUES ($1, $2, $3, $4, $5, $6)"
                ),
                &[&player_id, &kind_str, &amount, &table_id, &(timestamp as i64), &running_balance],
            )
            .await
            .map_err(|e| pg_err("inserting ledger entry", e))?;
        transaction.commit().await.map_err(|e| pg_err("committing transaction", e))?;
        Ok(LedgerEntry {
            player_id: player_id.to_string(),
            kind,
            amount,
            table_id,
            timestamp,
            running_balance,
        })
    }

    async fn history(&self, player_id: &str) -> Result<Vec<LedgerEntry>, EngineError> {
        let rows = self
            .query(
                const_format::concatcp!(
                    "SELECT player_id, kind, amount, table_id, ts, running_balance FROM ",
                    LEDGER_ENTRIES,
                    " WHERE player_id = $1 ORDER BY seq"
                ),
                &[&player_id],
            )
            .await
            .map_err(|e| pg_err("reading ledger history", e))?;
        Ok(rows
            .iter()
            .map(|row| {
                let kind_str: &str = row.get(1);
                LedgerEntry {
                    player_id: row.get(0),
                    kind: if kind_str == "buy" { LedgerEntryKind::Buy } else { LedgerEntryKind::Cashout },
                    amount: row.get(2),
                    table_id: row.get(3),
                    timestamp: row.get::<_, i64>(4) as u64,
                    running_balance: row.get(5),
                }
            })
            .collect())
    }
}
