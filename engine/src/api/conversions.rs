//! Conversions from domain models to view-model types.

use crate::api::types::{ProjectInfo, ProjectSummary, RetentionSummary};
use crate::core::domain::{Project, Retention};

impl From<&Project> for ProjectInfo {
    fn from(project: &Project) -> Self {
        ProjectInfo {
            project_id: project.project_id.clone(),
            name: project.name.clone(),
        }
    }
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        ProjectSummary {
            project_id: project.project_id.clone(),
            name: project.name.clone(),
            client: project.client.clone(),
            stage: project.stage.label().to_string(),
            start: project.range.start,
            end: project.range.end,
            contract_value: project.contract_value,
            value_bin: project.value_bin().to_string(),
            phase_count: project.phase_count(),
        }
    }
}

impl From<&Retention> for RetentionSummary {
    fn from(retention: &Retention) -> Self {
        RetentionSummary {
            retention_id: retention.retention_id.clone(),
            project_id: retention.project_id.clone(),
            contractor: retention.contractor.clone(),
            stage: retention.stage.label().to_string(),
            expected_total: retention.expected_total(),
            outstanding: retention.outstanding(),
            next_due: retention.next_due(),
        }
    }
}
