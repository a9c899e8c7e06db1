use std::sync::Arc;

use storage::Storage;

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::config::SessionConfig;
use crate::sessions::SessionLoopService;

/// Assembles app-facing services over an injected backend.
#[derive(Clone)]
pub struct AppServices {
    session_loop: Arc<SessionLoopService>,
    catalog: Arc<CatalogService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, config: SessionConfig) -> Self {
        let session_loop = Arc::new(
            SessionLoopService::new(
                clock,
                Arc::clone(&storage.questions),
                Arc::clone(&storage.submissions),
            )
            .with_config(config),
        );
        let catalog = Arc::new(CatalogService::new(Arc::clone(&storage.catalog)));

        Self {
            session_loop,
            catalog,
        }
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }
}
