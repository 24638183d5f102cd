//! Repository construction.

use std::sync::Arc;

use crate::store::memory::MemoryRepository;
use crate::store::repository::StoreResult;
use crate::store::sample;

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an empty in-memory repository.
    pub fn create_memory() -> Arc<MemoryRepository> {
        Arc::new(MemoryRepository::new())
    }

    /// Create an in-memory repository pre-loaded with the demo
    /// portfolio.
    pub fn create_seeded() -> StoreResult<Arc<MemoryRepository>> {
        let repo = Arc::new(MemoryRepository::new());
        sample::seed(repo.as_ref())?;
        Ok(repo)
    }
}
