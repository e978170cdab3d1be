use recordstore::{RecordStore, StoreError};
use tracing::error;

use crate::state::SharedStore;

/// Runs store IO on the blocking pool under the write guard, so
/// read-modify-write cycles never interleave. A task that dies before
/// returning is logged and reported as `on_abort`, the failure kind the
/// caller's operation maps to.
pub async fn with_store_blocking<R, F>(
    store: SharedStore,
    on_abort: fn(String) -> StoreError,
    f: F,
) -> recordstore::Result<R>
where
    R: Send + 'static,
    F: FnOnce(&mut Box<dyn RecordStore>) -> recordstore::Result<R> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = store.blocking_write();
        f(&mut *guard)
    })
    .await
    .unwrap_or_else(|e| {
        error!("store task aborted: {e}");
        Err(on_abort(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use recordstore::InMemoryRecordStore;

    #[tokio::test]
    async fn test_runs_closure_against_store() {
        let state = AppState::new(InMemoryRecordStore::new("a\n1\n"));
        let text = with_store_blocking(state.store.clone(), StoreError::Read, |store| {
            store.read_text().map_err(|e| StoreError::Read(e.to_string()))
        })
        .await
        .unwrap();
        assert_eq!(text, "a\n1\n");
    }

    #[tokio::test]
    async fn test_panicking_task_maps_to_given_kind() {
        let state = AppState::new(InMemoryRecordStore::new("a\n1\n"));
        let err = with_store_blocking(state.store.clone(), StoreError::Write, |_store| -> recordstore::Result<()> {
            panic!("boom")
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Write(_)));

        // the lock is usable again afterwards
        let ok = with_store_blocking(state.store.clone(), StoreError::Read, |store| {
            store.read_text().map_err(|e| StoreError::Read(e.to_string()))
        })
        .await;
        assert!(ok.is_ok());
    }
}
