pub mod registry;
pub mod tempfiles;

use std::sync::Arc;

pub use registry::{Executable, ExecutableRegistry};
pub use tempfiles::TempfileManager;

use crate::config::AppConfig;

/// Shared services every solver adapter is constructed with
#[derive(Clone)]
pub struct Services {
    pub registry: Arc<ExecutableRegistry>,
    pub tempfiles: Arc<TempfileManager>,
}

impl Services {
    pub fn new(registry: ExecutableRegistry, tempfiles: TempfileManager) -> Self {
        Services {
            registry: Arc::new(registry),
            tempfiles: Arc::new(tempfiles),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Services::new(
            ExecutableRegistry::with_cache_size(config.search_path.clone(), config.cache_size),
            TempfileManager::new(&config.tmpdir),
        )
    }
}
