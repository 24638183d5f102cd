use crate::api::{ProjectSummary, RetentionSummary};
use crate::store::repository::PortfolioRepository;
use crate::transformations::filtering::{
    filter_projects, filter_retentions, ProjectFilter, RetentionFilter,
};

/// Get project rows for the list view, filtered.
pub fn get_project_list(
    repo: &dyn PortfolioRepository,
    filter: &ProjectFilter,
) -> Result<Vec<ProjectSummary>, String> {
    let projects = repo.list_projects().map_err(|e| e.to_string())?;

    Ok(filter_projects(&projects, filter)
        .into_iter()
        .map(ProjectSummary::from)
        .collect())
}

/// Get retention rows for the list half of the board view, filtered.
pub fn get_retention_list(
    repo: &dyn PortfolioRepository,
    filter: &RetentionFilter,
) -> Result<Vec<RetentionSummary>, String> {
    let retentions = repo.list_retentions().map_err(|e| e.to_string())?;

    Ok(filter_retentions(&retentions, filter)
        .into_iter()
        .map(RetentionSummary::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::RetentionStage;
    use crate::store::memory::MemoryRepository;
    use crate::store::sample;

    fn seeded() -> MemoryRepository {
        let repo = MemoryRepository::new();
        sample::seed(&repo).unwrap();
        repo
    }

    #[test]
    fn unfiltered_lists_mirror_the_store() {
        let repo = seeded();

        let projects = get_project_list(&repo, &ProjectFilter::default()).unwrap();
        assert_eq!(projects.len(), 6);
        assert_eq!(projects[0].project_id, "P-1001");
        assert_eq!(projects[0].stage, "Structure");

        let retentions = get_retention_list(&repo, &RetentionFilter::default()).unwrap();
        assert_eq!(retentions.len(), 5);
    }

    #[test]
    fn filters_apply_before_conversion() {
        let repo = seeded();

        let filter = RetentionFilter {
            stages: Some(vec![RetentionStage::Released]),
            ..Default::default()
        };
        let rows = get_retention_list(&repo, &filter).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].retention_id, "R-2004");
        assert_eq!(rows[0].outstanding, 0.0);
    }
}
