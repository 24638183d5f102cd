//! Repository trait for abstracting portfolio storage.
//!
//! This trait defines the interface the service layer talks to. The only
//! shipped implementation is the in-memory store, but the seam keeps the
//! services testable against purpose-built fixtures.

use crate::api::ProjectInfo;
use crate::core::domain::{DateRange, Project, Retention, RetentionStage, ShutdownPeriod};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError::Internal(s)
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError::Internal(s.to_string())
    }
}

/// Repository trait for portfolio storage.
///
/// All operations are synchronous: the engine recomputes views from the
/// current store contents on each input change, and the backing store is
/// plain process memory.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can be
/// shared behind the global accessor.
pub trait PortfolioRepository: Send + Sync {
    // ==================== Health ====================

    /// Check whether the store is usable.
    fn health_check(&self) -> StoreResult<bool>;

    // ==================== Project Operations ====================

    /// Store a project, replacing any existing project with the same id.
    ///
    /// # Returns
    /// * `Ok(ProjectInfo)` - Lightweight metadata of the stored project
    fn store_project(&self, project: &Project) -> StoreResult<ProjectInfo>;

    /// Retrieve a project by id.
    ///
    /// # Returns
    /// * `Err(StoreError::NotFound)` - If the project doesn't exist
    fn get_project(&self, project_id: &str) -> StoreResult<Project>;

    /// List all projects in insertion order.
    fn list_projects(&self) -> StoreResult<Vec<Project>>;

    /// Full date envelope of a project: the programme range extended to
    /// cover any phases that escape it.
    fn project_time_range(&self, project_id: &str) -> StoreResult<DateRange>;

    // ==================== Retention Operations ====================

    /// Store a retention record, replacing any existing record with the
    /// same id.
    fn store_retention(&self, retention: &Retention) -> StoreResult<()>;

    /// Retrieve a retention record by id.
    fn get_retention(&self, retention_id: &str) -> StoreResult<Retention>;

    /// List all retention records in insertion order.
    fn list_retentions(&self) -> StoreResult<Vec<Retention>>;

    /// List retention records linked to one project.
    fn retentions_for_project(&self, project_id: &str) -> StoreResult<Vec<Retention>>;

    /// Move a retention record to a new board stage.
    ///
    /// The move is applied unconditionally; transition legality is the
    /// board service's concern.
    ///
    /// # Returns
    /// * `Ok(Retention)` - The updated record
    fn set_retention_stage(
        &self,
        retention_id: &str,
        stage: RetentionStage,
    ) -> StoreResult<Retention>;

    // ==================== Shutdown Periods ====================

    /// Append shutdown periods to the store.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of periods stored
    fn store_shutdowns(&self, periods: &[ShutdownPeriod]) -> StoreResult<usize>;

    /// List all shutdown periods.
    fn list_shutdowns(&self) -> StoreResult<Vec<ShutdownPeriod>>;

    // ==================== Dataset Bookkeeping ====================

    /// Record the checksum of an imported dataset.
    ///
    /// # Returns
    /// * `Ok(true)` - Checksum was new
    /// * `Ok(false)` - Identical dataset was imported before
    fn record_dataset_checksum(&self, checksum: &str) -> StoreResult<bool>;
}
