//! In-memory repository implementation.
//!
//! All data lives in HashMaps and Vecs behind one `RwLock`, which is the
//! whole persistence story of this engine: the dashboard is backed by
//! static sample data or a one-shot import, never by a database.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::api::ProjectInfo;
use crate::core::domain::{DateRange, Project, Retention, RetentionStage, ShutdownPeriod};
use crate::store::repository::{PortfolioRepository, StoreError, StoreResult};

/// In-memory portfolio store.
///
/// Cloning is cheap and shares the underlying data.
#[derive(Clone)]
pub struct MemoryRepository {
    data: Arc<RwLock<MemoryData>>,
}

struct MemoryData {
    projects: HashMap<String, Project>,
    project_order: Vec<String>,

    retentions: HashMap<String, Retention>,
    retention_order: Vec<String>,

    shutdowns: Vec<ShutdownPeriod>,

    // Checksums of every dataset imported into this store.
    seen_checksums: HashSet<String>,

    is_healthy: bool,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            projects: HashMap::new(),
            project_order: Vec::new(),
            retentions: HashMap::new(),
            retention_order: Vec::new(),
            shutdowns: Vec::new(),
            seen_checksums: HashSet::new(),
            is_healthy: true,
        }
    }
}

impl MemoryRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(MemoryData::default())),
        }
    }

    /// Flip the health flag, for exercising degraded-store paths in
    /// tests.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the store.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let healthy = data.is_healthy;
        *data = MemoryData {
            is_healthy: healthy,
            ..Default::default()
        };
    }

    /// Number of projects stored.
    pub fn project_count(&self) -> usize {
        self.data.read().unwrap().projects.len()
    }

    /// Number of retention records stored.
    pub fn retention_count(&self) -> usize {
        self.data.read().unwrap().retentions.len()
    }

    /// Check whether a project exists.
    pub fn has_project(&self, project_id: &str) -> bool {
        self.data.read().unwrap().projects.contains_key(project_id)
    }

    fn check_health(&self) -> StoreResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(StoreError::Internal("Store is not healthy".to_string()));
        }
        Ok(())
    }

    fn get_project_impl(&self, project_id: &str) -> StoreResult<Project> {
        let data = self.data.read().unwrap();
        data.projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Project {} not found", project_id)))
    }

    fn get_retention_impl(&self, retention_id: &str) -> StoreResult<Retention> {
        let data = self.data.read().unwrap();
        data.retentions
            .get(retention_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Retention {} not found", retention_id)))
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioRepository for MemoryRepository {
    fn health_check(&self) -> StoreResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    fn store_project(&self, project: &Project) -> StoreResult<ProjectInfo> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        if !data.projects.contains_key(&project.project_id) {
            data.project_order.push(project.project_id.clone());
        }
        data.projects
            .insert(project.project_id.clone(), project.clone());

        Ok(ProjectInfo::from(project))
    }

    fn get_project(&self, project_id: &str) -> StoreResult<Project> {
        self.get_project_impl(project_id)
    }

    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let data = self.data.read().unwrap();
        Ok(data
            .project_order
            .iter()
            .filter_map(|id| data.projects.get(id).cloned())
            .collect())
    }

    fn project_time_range(&self, project_id: &str) -> StoreResult<DateRange> {
        let project = self.get_project_impl(project_id)?;

        let mut start = project.range.start;
        let mut end = project.range.end;
        for phase in &project.phases {
            if phase.range.is_valid() {
                start = start.min(phase.range.start);
                end = end.max(phase.range.end);
            }
        }

        Ok(DateRange::new(start, end))
    }

    fn store_retention(&self, retention: &Retention) -> StoreResult<()> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        if !data.retentions.contains_key(&retention.retention_id) {
            data.retention_order.push(retention.retention_id.clone());
        }
        data.retentions
            .insert(retention.retention_id.clone(), retention.clone());
        Ok(())
    }

    fn get_retention(&self, retention_id: &str) -> StoreResult<Retention> {
        self.get_retention_impl(retention_id)
    }

    fn list_retentions(&self) -> StoreResult<Vec<Retention>> {
        let data = self.data.read().unwrap();
        Ok(data
            .retention_order
            .iter()
            .filter_map(|id| data.retentions.get(id).cloned())
            .collect())
    }

    fn retentions_for_project(&self, project_id: &str) -> StoreResult<Vec<Retention>> {
        let data = self.data.read().unwrap();
        Ok(data
            .retention_order
            .iter()
            .filter_map(|id| data.retentions.get(id))
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect())
    }

    fn set_retention_stage(
        &self,
        retention_id: &str,
        stage: RetentionStage,
    ) -> StoreResult<Retention> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let retention = data
            .retentions
            .get_mut(retention_id)
            .ok_or_else(|| StoreError::NotFound(format!("Retention {} not found", retention_id)))?;
        retention.stage = stage;
        Ok(retention.clone())
    }

    fn store_shutdowns(&self, periods: &[ShutdownPeriod]) -> StoreResult<usize> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        data.shutdowns.extend_from_slice(periods);
        Ok(periods.len())
    }

    fn list_shutdowns(&self) -> StoreResult<Vec<ShutdownPeriod>> {
        let data = self.data.read().unwrap();
        Ok(data.shutdowns.clone())
    }

    fn record_dataset_checksum(&self, checksum: &str) -> StoreResult<bool> {
        let mut data = self.data.write().unwrap();
        Ok(data.seen_checksums.insert(checksum.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{Moiety, ProjectStage};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn project(id: &str) -> Project {
        Project {
            project_id: id.to_string(),
            name: format!("Project {}", id),
            client: "Client".to_string(),
            stage: ProjectStage::Civil,
            site: None,
            range: DateRange::new(d(2025, 1, 1), d(2025, 12, 31)),
            phases: vec![],
            contract_value: 1_000_000.0,
        }
    }

    fn retention(id: &str, project_id: &str) -> Retention {
        Retention {
            retention_id: id.to_string(),
            project_id: project_id.to_string(),
            contractor: "Contractor".to_string(),
            contract_value: 1_000_000.0,
            retention_percent: 5.0,
            practical_completion: None,
            dlp_months: 12,
            stage: RetentionStage::Held,
            first_moiety: Moiety::unscheduled(),
            second_moiety: Moiety::unscheduled(),
        }
    }

    #[test]
    fn stores_and_lists_in_insertion_order() {
        let repo = MemoryRepository::new();
        repo.store_project(&project("b")).unwrap();
        repo.store_project(&project("a")).unwrap();
        repo.store_project(&project("c")).unwrap();

        let ids: Vec<String> = repo
            .list_projects()
            .unwrap()
            .into_iter()
            .map(|p| p.project_id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn replacing_a_project_keeps_its_position() {
        let repo = MemoryRepository::new();
        repo.store_project(&project("a")).unwrap();
        repo.store_project(&project("b")).unwrap();

        let mut updated = project("a");
        updated.name = "Renamed".to_string();
        repo.store_project(&updated).unwrap();

        let projects = repo.list_projects().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Renamed");
    }

    #[test]
    fn missing_lookups_are_not_found() {
        let repo = MemoryRepository::new();
        assert!(matches!(
            repo.get_project("nope"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            repo.set_retention_stage("nope", RetentionStage::Released),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn time_range_covers_escaping_phases() {
        use crate::core::domain::Phase;

        let mut p = project("a");
        p.phases.push(Phase {
            name: "Early works".to_string(),
            trade: "civil".to_string(),
            range: DateRange::new(d(2024, 11, 1), d(2025, 2, 1)),
        });

        let repo = MemoryRepository::new();
        repo.store_project(&p).unwrap();

        let envelope = repo.project_time_range("a").unwrap();
        assert_eq!(envelope.start, d(2024, 11, 1));
        assert_eq!(envelope.end, d(2025, 12, 31));
    }

    #[test]
    fn retention_stage_updates_persist() {
        let repo = MemoryRepository::new();
        repo.store_retention(&retention("r1", "a")).unwrap();

        let updated = repo
            .set_retention_stage("r1", RetentionStage::FirstMoietyDue)
            .unwrap();
        assert_eq!(updated.stage, RetentionStage::FirstMoietyDue);
        assert_eq!(
            repo.get_retention("r1").unwrap().stage,
            RetentionStage::FirstMoietyDue
        );
    }

    #[test]
    fn duplicate_checksums_are_reported() {
        let repo = MemoryRepository::new();
        assert!(repo.record_dataset_checksum("abc").unwrap());
        assert!(!repo.record_dataset_checksum("abc").unwrap());
        assert!(repo.record_dataset_checksum("def").unwrap());
    }

    #[test]
    fn unhealthy_store_rejects_writes() {
        let repo = MemoryRepository::new();
        repo.set_healthy(false);

        assert!(!repo.health_check().unwrap());
        assert!(repo.store_project(&project("a")).is_err());
    }
}
