pub mod memory;
pub mod mongo;
pub mod store;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{DocumentStore, StoreError};

use std::sync::Arc;

use shared_config::AppConfig;

/// State handed to every router.
///
/// The store sits behind `Arc<dyn DocumentStore>` so the same routers run
/// against MongoDB in production and against [`memory::MemoryStore`] in tests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
