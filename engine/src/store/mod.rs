//! Portfolio storage.
//!
//! This module follows a layered arrangement:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Service layer (services/) - view assembly  │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  Repository trait (repository.rs)           │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  Memory repository (memory.rs)              │
//! │  seeded from sample.rs or a one-shot import │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one backend: everything lives in process memory for
//! the lifetime of the view, seeded from the built-in sample portfolio
//! or populated through the preprocessing pipeline.

pub mod checksum;
pub mod factory;
pub mod memory;
pub mod repository;
pub mod sample;

pub use checksum::calculate_checksum;
pub use factory::RepositoryFactory;
pub use memory::MemoryRepository;
pub use repository::{PortfolioRepository, StoreError, StoreResult};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Global repository instance initialized once per process.
static REPOSITORY: OnceCell<Arc<dyn PortfolioRepository>> = OnceCell::new();

/// Initialize the global store with the built-in demo portfolio.
///
/// Idempotent: repeated calls after the first are no-ops.
pub fn init_store() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo: Arc<dyn PortfolioRepository> =
        RepositoryFactory::create_seeded().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
///
/// Initializes the store with the demo portfolio on first use.
pub fn get_store() -> Result<&'static Arc<dyn PortfolioRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_store();
    }

    REPOSITORY
        .get()
        .context("Store not initialized. Call init_store() first.")
}
