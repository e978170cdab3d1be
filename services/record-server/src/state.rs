use std::sync::Arc;
use tokio::sync::RwLock;
use recordstore::RecordStore;

pub type SharedState = Arc<AppState>;
pub type SharedStore = Arc<RwLock<Box<dyn RecordStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new<S: RecordStore + 'static>(store: S) -> Self {
        let store: Box<dyn RecordStore> = Box::new(store);
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
