//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShorteningService;
use crate::domain::repositories::MappingRepository;

/// Mapping service backed by whichever store the server was configured with.
pub type DynShorteningService = ShorteningService<dyn MappingRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<DynShorteningService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn MappingRepository>) -> Self {
        Self {
            shortening_service: Arc::new(ShorteningService::new(repository)),
        }
    }
}
