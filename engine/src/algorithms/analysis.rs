//! Portfolio-level summary statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::domain::{Project, ProjectStage, Retention};

/// Count of projects in one delivery stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCount {
    pub stage: String,
    pub count: usize,
}

/// Dataset-level summary statistics for the insights view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_contract_value: f64,
    pub mean_contract_value: f64,
    pub median_contract_value: f64,
    pub stage_counts: Vec<StageCount>,
    pub total_retention_held: f64,
    pub mean_retention_percent: f64,
    pub released_moieties: usize,
    pub total_moieties: usize,
    pub release_rate: f64,
}

/// Compute dataset-level summary statistics.
///
/// # Arguments
/// * `projects` - All projects in the portfolio
/// * `retentions` - All retention records
/// * `as_of` - Reference date for active/completed classification
pub fn compute_snapshot(
    projects: &[Project],
    retentions: &[Retention],
    as_of: NaiveDate,
) -> PortfolioSnapshot {
    let total_projects = projects.len();
    let active_projects = projects.iter().filter(|p| p.is_active_on(as_of)).count();
    let completed_projects = projects.iter().filter(|p| p.range.end < as_of).count();

    let values: Vec<f64> = projects.iter().map(|p| p.contract_value).collect();
    let total_contract_value: f64 = values.iter().sum();
    let mean_contract_value = if values.is_empty() {
        0.0
    } else {
        total_contract_value / values.len() as f64
    };

    let mut sorted_values = values.clone();
    sorted_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_contract_value = if sorted_values.is_empty() {
        0.0
    } else if sorted_values.len() % 2 == 0 {
        (sorted_values[sorted_values.len() / 2 - 1] + sorted_values[sorted_values.len() / 2]) / 2.0
    } else {
        sorted_values[sorted_values.len() / 2]
    };

    let stage_counts = ProjectStage::ALL
        .iter()
        .map(|stage| StageCount {
            stage: stage.label().to_string(),
            count: projects.iter().filter(|p| p.stage == *stage).count(),
        })
        .filter(|sc| sc.count > 0)
        .collect();

    let total_retention_held: f64 = retentions.iter().map(|r| r.outstanding()).sum();
    let mean_retention_percent = if retentions.is_empty() {
        0.0
    } else {
        retentions.iter().map(|r| r.retention_percent).sum::<f64>() / retentions.len() as f64
    };

    let total_moieties = retentions.len() * 2;
    let released_moieties = retentions
        .iter()
        .map(|r| {
            usize::from(r.first_moiety.released) + usize::from(r.second_moiety.released)
        })
        .sum();
    let release_rate = if total_moieties > 0 {
        released_moieties as f64 / total_moieties as f64
    } else {
        0.0
    };

    PortfolioSnapshot {
        total_projects,
        active_projects,
        completed_projects,
        total_contract_value,
        mean_contract_value,
        median_contract_value,
        stage_counts,
        total_retention_held,
        mean_retention_percent,
        released_moieties,
        total_moieties,
        release_rate,
    }
}
