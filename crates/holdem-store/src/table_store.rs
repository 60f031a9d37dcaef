use crate::document::TableDocument;
use holdem_core::EngineError;
use holdem_core::TableId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Optimistic-concurrency stamp: a `TableStore::commit` whose `expected`
/// does not match the currently stored revision means another transaction
/// committed first, and is reported as `Aborted` (§4.8, §7).
pub type Revision = u64;

/// A document-store-shaped storage backend for table documents (§6.4). Every
/// method is a single round trip; transactional read-mutate-commit cycling
/// lives in [`crate::TransactionGateway`], not here.
#[async_trait::async_trait]
pub trait TableStore: Send + Sync {
    /// Create a brand-new table document. Fails `AlreadyExists` if the id is
    /// already taken.
    async fn create(&self, document: TableDocument) -> Result<(), EngineError>;
    /// Read the current revision and document for `id`. Fails `NotFound` if
    /// absent.
    async fn read(&self, id: &TableId) -> Result<(Revision, TableDocument), EngineError>;
    /// Compare-and-swap: commit `document` only if the stored revision still
    /// equals `expected`, returning the new revision. Fails `Aborted` on a
    /// mismatch and `NotFound` if the table no longer exists.
    async fn commit(&self, id: &TableId, expected: Revision, document: TableDocument) -> Result<Revision, EngineError>;
    async fn exists(&self, id: &TableId) -> Result<bool, EngineError>;
    /// Ids of every table currently `playing`, for the expired-action sweep
    /// (§6.5) to poll without scanning tables that have no clock to check.
    async fn list_active(&self) -> Result<Vec<TableId>, EngineError>;
}

/// In-memory `TableStore`, the default backend for tests and the local
/// binary. A single `Mutex` around the whole table gives the same
/// linearizability guarantee §5 asks of the document store, without
/// requiring a real external database.
#[derive(Default)]
pub struct MemoryTableStore {
    tables: Mutex<HashMap<TableId, (Revision, TableDocument)>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait::async_trait]
impl TableStore for MemoryTableStore {
    async fn create(&self, document: TableDocument) -> Result<(), EngineError> {
        let mut tables = self.tables.lock().await;
        if tables.contains_key(&document.id()) {
            return Err(EngineError::already_exists(format!("table {} already exists", document.id())));
        }
        tables.insert(document.id(), (0, document));
        Ok(())
    }

    async fn read(&self, id: &TableId) -> Result<(Revision, TableDocument), EngineError> {
        let tables = self.tables.lock().await;
        tables
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(format!("table {id} not found")))
    }

    async fn commit(&self, id: &TableId, expected: Revision, document: TableDocument) -> Result<Revision, EngineError> {
        let mut tables = self.tables.lock().await;
        let Some((revision, stored)) = tables.get_mut(id) else {
            return Err(EngineError::not_found(format!("table {id} not found")));
        };
        if *revision != expected {
            return Err(EngineError::aborted(format!(
                "table {id} was modified concurrently (expected revision {expected}, found {revision})"
            )));
        }
        *revision += 1;
        *stored = document;
        Ok(*revision)
    }

    async fn exists(&self, id: &TableId) -> Result<bool, EngineError> {
        Ok(self.tables.lock().await.contains_key(id))
    }

    async fn list_active(&self) -> Result<Vec<TableId>, EngineError> {
        Ok(self
            .tables
            .lock()
            .await
            .values()
            .filter(|(_, doc)| doc.status() == crate::document::TableStatus::Playing)
            .map(|(_, doc)| doc.id())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_gameplay::TableSettings;

    fn doc(id: TableId) -> TableDocument {
        TableDocument::new(id, "host", TableSettings::default(), 0)
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let store = MemoryTableStore::new();
        let id = TableId::parse("1234").unwrap();
        store.create(doc(id)).await.unwrap();
        let (revision, loaded) = store.read(&id).await.unwrap();
        assert_eq!(revision, 0);
        assert_eq!(loaded.id(), id);
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let store = MemoryTableStore::new();
        let id = TableId::parse("1234").unwrap();
        store.create(doc(id)).await.unwrap();
        let err = store.create(doc(id)).await.unwrap_err();
        assert_eq!(err.kind(), holdem_core::ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn stale_revision_is_aborted() {
        let store = MemoryTableStore::new();
        let id = TableId::parse("1234").unwrap();
        store.create(doc(id)).await.unwrap();
        let (revision, document) = store.read(&id).await.unwrap();
        store.commit(&id, revision, document.clone()).await.unwrap();
        let err = store.commit(&id, revision, document).await.unwrap_err();
        assert_eq!(err.kind(), holdem_core::ErrorKind::Aborted);
    }

    #[tokio::test]
    async fn list_active_only_returns_playing_tables() {
        let store = MemoryTableStore::new();
        let waiting = TableId::parse("1111").unwrap();
        let playing = TableId::parse("2222").unwrap();
        store.create(doc(waiting)).await.unwrap();
        store.create(doc(playing)).await.unwrap();
        let mut document = doc(playing);
        document.set_status(crate::document::TableStatus::Playing);
        store.commit(&playing, 0, document).await.unwrap();

        let active = store.list_active().await.unwrap();
        assert_eq!(active, vec![playing]);
    }

    #[tokio::test]
    async fn read_of_missing_table_is_not_found() {
        let store = MemoryTableStore::new();
        let err = store.read(&TableId::parse("9999").unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), holdem_core::ErrorKind::NotFound);
    }
}
