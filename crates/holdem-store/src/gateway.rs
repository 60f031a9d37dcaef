use crate::document::TableDocument;
use crate::table_store::TableStore;
use holdem_core::EngineError;
use holdem_core::ErrorKind;
use holdem_core::TableId;
use std::sync::Arc;

/// Wraps any [`TableStore`] with the read-mutate-commit retry loop every RPC
/// operation runs through (§4.8): read the document, apply a pure mutation,
/// commit it back, and retry the whole cycle if the commit lost a race.
pub struct TransactionGateway<S> {
    store: Arc<S>,
}

impl<S: TableStore> TransactionGateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run `mutate` against the table's current document, retrying up to
    /// `attempts` times on a concurrent-write conflict. `mutate` must be pure
    /// with respect to anything outside the document it's given: the gateway
    /// may invoke it more than once per call.
    pub async fn run<T, F>(&self, table_id: &TableId, attempts: u32, mut mutate: F) -> Result<T, EngineError>
    where
        F: FnMut(&mut TableDocument) -> Result<T, EngineError>,
    {
        if attempts == 0 {
            return Err(EngineError::internal("transaction attempts must be at least 1"));
        }
        let mut last_err = None;
        for attempt in 0..attempts {
            let (revision, mut document) = self.store.read(table_id).await?;
            let outcome = mutate(&mut document);
            let value = match outcome {
                Ok(value) => value,
                Err(err) => return Err(err),
            };
            match self.store.commit(table_id, revision, document).await {
                Ok(_) => return Ok(value),
                Err(err) if err.kind() == ErrorKind::Aborted => {
                    log::debug!("transaction on table {table_id} aborted, attempt {}/{attempts}", attempt + 1);
                    last_err = Some(err);
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or_else(|| EngineError::aborted("transaction retries exhausted")))
    }
}

impl<S> Clone for TransactionGateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_store::MemoryTableStore;
    use holdem_gameplay::TableSettings;
    use std::sync::atomic::AtomicU32;
    use std::sync::atomic::Ordering;

    fn doc(id: TableId) -> TableDocument {
        TableDocument::new(id, "host", TableSettings::default(), 0)
    }

    #[tokio::test]
    async fn successful_mutation_commits_once() {
        let store = MemoryTableStore::shared();
        let id = TableId::parse("1111").unwrap();
        store.create(doc(id)).await.unwrap();
        let gateway = TransactionGateway::new(store.clone());

        let result = gateway
            .run(&id, 5, |document| {
                document.set_host("new-host");
                Ok(42)
            })
            .await
            .unwrap();

        assert_eq!(result, 42);
        let (_, loaded) = store.read(&id).await.unwrap();
        assert_eq!(loaded.host_id(), "new-host");
    }

    #[tokio::test]
    async fn mutation_error_short_circuits_without_committing() {
        let store = MemoryTableStore::shared();
        let id = TableId::parse("2222").unwrap();
        store.create(doc(id)).await.unwrap();
        let gateway = TransactionGateway::new(store.clone());

        let err = gateway
            .run(&id, 5, |_document| Err::<(), _>(EngineError::failed_precondition("no")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::FailedPrecondition);
    }

    #[tokio::test]
    async fn retries_on_concurrent_conflict_until_it_succeeds() {
        let store = MemoryTableStore::shared();
        let id = TableId::parse("3333").unwrap();
        store.create(doc(id)).await.unwrap();

        let (revision, mut stale) = store.read(&id).await.unwrap();
        stale.set_host("racer");
        store.commit(&id, revision, stale).await.unwrap();

        let calls = AtomicU32::new(0);
        let gateway = TransactionGateway::new(store.clone());
        let result = gateway
            .run(&id, 5, |document| {
                calls.fetch_add(1, Ordering::SeqCst);
                document.set_host("winner");
                Ok(())
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
