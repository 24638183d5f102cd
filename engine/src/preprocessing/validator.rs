//! Portfolio validation with detailed error and warning reporting.
//!
//! This module validates imported portfolio data for completeness,
//! consistency, and correctness. Errors block an import (duplicate ids,
//! impossible retention terms); warnings flag data the dashboard will
//! tolerate and hide (inverted ranges, phases escaping the programme).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::domain::{Project, Retention};

/// Validation outcome with categorized issues and statistics.
///
/// Errors make `is_valid` false, while warnings are informational but
/// don't fail validation.
///
/// # Examples
///
/// ```
/// use siteline_engine::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("Duplicate project id".to_string());
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_projects: usize,
    pub total_phases: usize,
    pub total_retentions: usize,
    pub inverted_ranges: usize,
    pub phases_outside_programme: usize,
    pub duplicate_ids: usize,
    pub invalid_percentages: usize,
    pub unlinked_retentions: usize,
    pub missing_sites: usize,
}

impl ValidationResult {
    /// Creates a new result with valid status and empty issue lists.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteline_engine::preprocessing::validator::ValidationResult;
    ///
    /// let mut result = ValidationResult::new();
    /// result.add_warning("Phase runs past the programme".to_string());
    /// assert!(result.is_valid);
    /// assert_eq!(result.warnings.len(), 1);
    /// ```
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for imported portfolio data.
pub struct PortfolioValidator;

impl PortfolioValidator {
    /// Validates a parsed portfolio.
    ///
    /// Performs:
    /// - Duplicate id detection for projects and retentions (errors)
    /// - Retention percentage range checks (errors outside 0-100)
    /// - Inverted date range detection (warnings; the timeline hides them)
    /// - Phase-vs-programme envelope checks (warnings)
    /// - Cross-reference checks between retentions and projects (warnings)
    ///
    /// Parser-level issues passed in `import_issues` are folded in as
    /// warnings so a single report covers the whole import.
    pub fn validate(
        projects: &[Project],
        retentions: &[Retention],
        import_issues: &[String],
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        for issue in import_issues {
            result.add_warning(format!("Import: {}", issue));
        }

        result.stats.total_projects = projects.len();
        result.stats.total_retentions = retentions.len();

        let mut seen_project_ids = HashSet::new();
        for project in projects {
            if !seen_project_ids.insert(project.project_id.as_str()) {
                result.stats.duplicate_ids += 1;
                result.add_error(format!("Duplicate project id: {}", project.project_id));
            }

            if !project.range.is_valid() {
                result.stats.inverted_ranges += 1;
                result.add_warning(format!(
                    "Project {}: programme ends before it starts, bar will be hidden",
                    project.project_id
                ));
            }

            if project.site.is_none() {
                result.stats.missing_sites += 1;
            }

            if project.contract_value < 0.0 {
                result.add_error(format!(
                    "Project {}: negative contract value",
                    project.project_id
                ));
            }

            for phase in &project.phases {
                result.stats.total_phases += 1;

                if !phase.range.is_valid() {
                    result.stats.inverted_ranges += 1;
                    result.add_warning(format!(
                        "Project {}: phase \"{}\" ends before it starts, bar will be hidden",
                        project.project_id, phase.name
                    ));
                } else if project.range.is_valid()
                    && (phase.range.start < project.range.start
                        || phase.range.end > project.range.end)
                {
                    result.stats.phases_outside_programme += 1;
                    result.add_warning(format!(
                        "Project {}: phase \"{}\" extends outside the programme",
                        project.project_id, phase.name
                    ));
                }
            }
        }

        let mut seen_retention_ids = HashSet::new();
        for retention in retentions {
            if !seen_retention_ids.insert(retention.retention_id.as_str()) {
                result.stats.duplicate_ids += 1;
                result.add_error(format!(
                    "Duplicate retention id: {}",
                    retention.retention_id
                ));
            }

            if !(0.0..=100.0).contains(&retention.retention_percent) {
                result.stats.invalid_percentages += 1;
                result.add_error(format!(
                    "Retention {}: percentage out of range: {}",
                    retention.retention_id, retention.retention_percent
                ));
            } else if retention.retention_percent > 20.0 {
                result.add_warning(format!(
                    "Retention {}: unusually high percentage: {}",
                    retention.retention_id, retention.retention_percent
                ));
            }

            if !seen_project_ids.contains(retention.project_id.as_str()) {
                result.stats.unlinked_retentions += 1;
                result.add_warning(format!(
                    "Retention {}: references unknown project {}",
                    retention.retention_id, retention.project_id
                ));
            }

            if let Some(pc) = retention.practical_completion {
                if let Some(project) = projects
                    .iter()
                    .find(|p| p.project_id == retention.project_id)
                {
                    if pc < project.range.start {
                        result.add_warning(format!(
                            "Retention {}: practical completion predates the project start",
                            retention.retention_id
                        ));
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{DateRange, Moiety, Phase, ProjectStage, RetentionStage};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn project(id: &str) -> Project {
        Project {
            project_id: id.to_string(),
            name: id.to_string(),
            client: "Client".to_string(),
            stage: ProjectStage::Civil,
            site: None,
            range: DateRange::new(d(2025, 1, 1), d(2025, 12, 31)),
            phases: vec![],
            contract_value: 1_000_000.0,
        }
    }

    fn retention(id: &str, project_id: &str, percent: f64) -> Retention {
        Retention {
            retention_id: id.to_string(),
            project_id: project_id.to_string(),
            contractor: "Contractor".to_string(),
            contract_value: 1_000_000.0,
            retention_percent: percent,
            practical_completion: None,
            dlp_months: 12,
            stage: RetentionStage::Held,
            first_moiety: Moiety::unscheduled(),
            second_moiety: Moiety::unscheduled(),
        }
    }

    #[test]
    fn clean_data_validates() {
        let projects = vec![project("a"), project("b")];
        let retentions = vec![retention("r1", "a", 5.0)];

        let result = PortfolioValidator::validate(&projects, &retentions, &[]);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
        assert_eq!(result.stats.total_projects, 2);
        assert_eq!(result.stats.total_retentions, 1);
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let projects = vec![project("a"), project("a")];
        let result = PortfolioValidator::validate(&projects, &[], &[]);

        assert!(!result.is_valid);
        assert_eq!(result.stats.duplicate_ids, 1);
    }

    #[test]
    fn inverted_ranges_warn_but_pass() {
        let mut p = project("a");
        p.range = DateRange::new(d(2025, 12, 31), d(2025, 1, 1));

        let result = PortfolioValidator::validate(&[p], &[], &[]);
        assert!(result.is_valid);
        assert_eq!(result.stats.inverted_ranges, 1);
        assert!(result.warnings[0].contains("hidden"));
    }

    #[test]
    fn escaping_phases_warn() {
        let mut p = project("a");
        p.phases.push(Phase {
            name: "Early works".to_string(),
            trade: "civil".to_string(),
            range: DateRange::new(d(2024, 11, 1), d(2025, 2, 1)),
        });

        let result = PortfolioValidator::validate(&[p], &[], &[]);
        assert!(result.is_valid);
        assert_eq!(result.stats.phases_outside_programme, 1);
    }

    #[test]
    fn percentage_bounds() {
        let projects = vec![project("a")];

        let result =
            PortfolioValidator::validate(&projects, &[retention("r1", "a", 120.0)], &[]);
        assert!(!result.is_valid);
        assert_eq!(result.stats.invalid_percentages, 1);

        let result = PortfolioValidator::validate(&projects, &[retention("r2", "a", 25.0)], &[]);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("unusually high"));
    }

    #[test]
    fn unlinked_retentions_warn() {
        let result =
            PortfolioValidator::validate(&[project("a")], &[retention("r1", "ghost", 5.0)], &[]);
        assert!(result.is_valid);
        assert_eq!(result.stats.unlinked_retentions, 1);
    }

    #[test]
    fn import_issues_become_warnings() {
        let result = PortfolioValidator::validate(&[], &[], &["bad date".to_string()]);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Import:"));
    }
}
